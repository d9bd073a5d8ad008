//! Test doubles shared by the session and tour suites.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal_macros::dec;
use tax_core::ai::{AiAssistant, AiError, AssistantService};
use tax_core::models::{
    Expenses, HouseholdServices, Income, Insurances, MaritalStatus, PersonalData, Religion,
    SectionData, TaxData,
};
use tax_core::store::{MemoryStore, StoreError, TaxDataStore};
use tax_core::wizard::WizardSession;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("tax_core=debug")
        .try_init();
}

// ── store ────────────────────────────────────────────────────────────────

/// [`MemoryStore`] that counts calls and can be switched into a failing mode.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    pub saves: AtomicUsize,
    pub clears: AtomicUsize,
    failing: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let store = Self::default();
        store.failing.store(true, Ordering::SeqCst);
        Arc::new(store)
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Reads straight from the backing store, bypassing the failure switch.
    pub async fn stored(&self, year: i32) -> Option<TaxData> {
        self.inner.load(year).await.unwrap()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Connection("store offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TaxDataStore for RecordingStore {
    async fn load(&self, year: i32) -> Result<Option<TaxData>, StoreError> {
        self.check()?;
        self.inner.load(year).await
    }

    async fn save(&self, year: i32, data: &TaxData) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.save(year, data).await
    }

    async fn clear(&self, year: i32) -> Result<(), StoreError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.clear(year).await
    }
}

// ── assistant ────────────────────────────────────────────────────────────

/// Returns a preset example declaration (or error) for every year.
pub struct StubAssistant {
    example: Mutex<Result<TaxData, AiError>>,
    pub example_calls: AtomicUsize,
}

impl StubAssistant {
    pub fn returning(example: Result<TaxData, AiError>) -> Arc<Self> {
        Arc::new(Self {
            example: Mutex::new(example),
            example_calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl AiAssistant for StubAssistant {
    async fn explain(&self, topic: &str) -> Result<String, AiError> {
        Ok(format!("{topic} erklärt"))
    }

    async fn suggestions(&self, _section: &SectionData, _year: i32) -> Result<String, AiError> {
        Ok("- Belege aufbewahren".to_string())
    }

    async fn generate_example_data(&self, _year: i32) -> Result<TaxData, AiError> {
        self.example_calls.fetch_add(1, Ordering::SeqCst);
        self.example.lock().unwrap().clone()
    }
}

// ── fixtures ─────────────────────────────────────────────────────────────

pub fn personal_data() -> SectionData {
    PersonalData {
        first_name: Some("Erika".to_string()),
        last_name: Some("Musterfrau".to_string()),
        date_of_birth: Some("1979-08-12".to_string()),
        street: Some("Lindenweg".to_string()),
        house_number: Some("4".to_string()),
        postal_code: Some("50667".to_string()),
        city: Some("Köln".to_string()),
        tax_id: Some("47036892816".to_string()),
        iban: Some("DE44500105175407324931".to_string()),
        marital_status: Some(MaritalStatus::Married),
        religion: Some(Religion::Protestant),
    }
    .into()
}

pub fn income() -> SectionData {
    Income {
        gross_salary: Some(dec!(51000)),
        income_tax: Some(dec!(8900)),
        solidarity_surcharge: Some(dec!(0)),
    }
    .into()
}

pub fn expenses() -> SectionData {
    Expenses {
        commute_days: Some(200),
        commute_distance: Some(dec!(25)),
        home_office_days: Some(20),
        ..Default::default()
    }
    .into()
}

pub fn insurances() -> SectionData {
    Insurances {
        health_insurance: Some(dec!(4700)),
        liability_insurance: Some(dec!(60)),
    }
    .into()
}

pub fn household_services() -> SectionData {
    HouseholdServices {
        services: Some(dec!(300)),
        tradesmen: Some(dec!(120)),
    }
    .into()
}

pub fn complete_declaration() -> TaxData {
    [
        personal_data(),
        income(),
        expenses(),
        insurances(),
        household_services(),
    ]
    .into_iter()
    .fold(TaxData::empty(), |data, section| data.merge_section(section))
}

/// Session over `store` whose assistant serves [`complete_declaration`].
pub async fn open_session(store: Arc<RecordingStore>, year: i32) -> WizardSession {
    init_tracing();
    let assistant = StubAssistant::returning(Ok(complete_declaration()));
    WizardSession::open(store, AssistantService::new(assistant), year)
        .await
        .unwrap()
}
