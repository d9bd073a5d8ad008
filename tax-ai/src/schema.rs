//! Response schema for generated example declarations, plus the clean-up
//! applied to what the model returns.

use serde_json::{Value, json};

fn text(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn number(description: &str) -> Value {
    json!({ "type": "NUMBER", "description": description })
}

fn integer(description: &str) -> Value {
    json!({ "type": "INTEGER", "description": description })
}

pub(crate) fn tax_data_schema(year: i32) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "personalData": {
                "type": "OBJECT",
                "properties": {
                    "firstName": text("Ein typischer deutscher Vorname."),
                    "lastName": text("Ein typischer deutscher Nachname."),
                    "dateOfBirth": text("Geburtsdatum im Format YYYY-MM-DD."),
                    "street": text("Ein fiktiver deutscher Straßenname."),
                    "houseNumber": text("Eine fiktive Hausnummer."),
                    "postalCode": text("Eine gültige 5-stellige deutsche Postleitzahl."),
                    "city": text("Eine deutsche Stadt."),
                    "taxId": text("Eine 11-stellige fiktive Steuer-ID."),
                    "iban": text("Eine gültige fiktive deutsche IBAN."),
                    "maritalStatus": {
                        "type": "STRING",
                        "enum": ["single"],
                        "description": "Muss 'single' sein."
                    },
                    "religion": {
                        "type": "STRING",
                        "enum": ["none", "catholic", "protestant"],
                        "description": "Religionszugehörigkeit."
                    }
                }
            },
            "income": {
                "type": "OBJECT",
                "properties": {
                    "grossSalary": number("Ein realistisches Bruttojahresgehalt (z.B. zwischen 45000 und 75000)."),
                    "incomeTax": number("Eine realistische, zum Gehalt passende Lohnsteuer."),
                    "solidaritySurcharge": number(&format!(
                        "Ein realistischer Solidaritätszuschlag, oft 0 für diese Gehaltsklasse in {year}."
                    ))
                }
            },
            "expenses": {
                "type": "OBJECT",
                "properties": {
                    "commuteDays": integer("Anzahl der Arbeitstage (z.B. 220)."),
                    "commuteDistance": number("Einfache Entfernung zur Arbeit in km (z.B. zwischen 10 und 40)."),
                    "homeOfficeDays": integer("Anzahl der Homeoffice-Tage (z.B. 80)."),
                    "workEquipment": number("Ausgaben für Arbeitsmittel (z.B. 150)."),
                    "trainingCosts": number("Ausgaben für Fortbildungen (z.B. 500)."),
                    "applicationCosts": number("Ausgaben für Bewerbungen (z.B. 50)."),
                    "workRelatedTravel": number("Andere berufsbedingte Reisekosten (z.B. 120)."),
                    "accountFees": number("Kontoführungspauschale, typischerweise 16.")
                }
            },
            "insurances": {
                "type": "OBJECT",
                "properties": {
                    "healthInsurance": number("Realistische selbst gezahlte Beiträge zur Kranken- und Pflegeversicherung."),
                    "liabilityInsurance": number("Realistische Beiträge für Haftpflichtversicherungen.")
                }
            },
            "householdServices": {
                "type": "OBJECT",
                "properties": {
                    "services": number("Ausgaben für haushaltsnahe Dienstleistungen (z.B. 300)."),
                    "tradesmen": number("Arbeitskosten für Handwerkerleistungen (z.B. 250).")
                }
            }
        }
    })
}

const DAY_COUNT_FIELDS: [&str; 2] = ["commuteDays", "homeOfficeDays"];

/// Models occasionally send day counts as `220.0`; round those to whole,
/// non-negative days so they decode into integer fields.
pub(crate) fn normalize_day_counts(document: &mut Value) {
    let Some(expenses) = document
        .get_mut("expenses")
        .and_then(Value::as_object_mut)
    else {
        return;
    };

    for field in DAY_COUNT_FIELDS {
        if let Some(value) = expenses.get_mut(field) {
            if value.is_f64() {
                let days = value.as_f64().unwrap_or_default().round().max(0.0);
                *value = json!(days as u64);
            }
        }
    }
}
