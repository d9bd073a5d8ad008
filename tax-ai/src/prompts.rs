//! Prompt texts sent to the model. All prompts ask for German answers.

pub(crate) fn explanation(topic: &str) -> String {
    format!(
        "Erkläre kurz und einfach in maximal 3 Sätzen für einen Laien in Deutschland, was \
         \"{topic}\" im Kontext der deutschen Steuererklärung bedeutet. Antworte auf Deutsch."
    )
}

pub(crate) fn suggestions(
    section_json: &str,
    year: i32,
) -> String {
    format!(
        "**Rolle:** Du bist ein erfahrener deutscher Steuerberater.\n\
         **Aufgabe:** Analysiere die folgenden JSON-Daten aus einem Abschnitt einer deutschen \
         Steuererklärung für das Jahr {year}. Gib basierend **ausschließlich** auf diesen Daten \
         1-2 konkrete, umsetzbare und freundliche Vorschläge, welche potenziellen Abzüge oder \
         Pauschalen der Benutzer möglicherweise übersehen hat. Antworte prägnant in Stichpunkten. \
         Wenn die Daten vollständig aussehen und keine offensichtlichen Lücken haben, gib eine \
         positive Bestätigung zurück.\n\
         **WICHTIGE REGELN:**\n\
         1. Basiere deine Vorschläge NUR auf den bereitgestellten Daten. Erfinde keine Szenarien.\n\
         2. Beziehe dich auf das deutsche Steuerrecht für {year}.\n\
         3. Formuliere als kurze, leicht verständliche Stichpunkte.\n\
         4. Gib keine allgemeine Finanzberatung.\n\
         **Analysiere jetzt diese Daten:**\n\
         {section_json}"
    )
}

pub(crate) fn example_data(year: i32) -> String {
    format!(
        "Erstelle ein vollständiges, realistisches Beispiel für eine deutsche Steuererklärung \
         (Jahr {year}) für einen einzelnen Angestellten (ledig, Steuerklasse 1) in Deutschland. \
         Gib die Daten ausschließlich als JSON-Objekt zurück, das dem bereitgestellten Schema \
         entspricht. Verwende fiktive, aber glaubwürdige deutsche Namen, Adressen und \
         Finanzdaten."
    )
}
