//! Create/edit form for custom currencies.
//!
//! Real-world currencies are imported; this form only covers custom ones.
//! The currency code and numeric code each pass a format check followed by a
//! uniqueness check against the currency storage. The checks are exposed
//! separately so callers (and tests) can run either on its own.

use crate::core::currency::Currency;
use crate::core::entity::{Entity, EntityStorage};
use crate::errors::{ElementError, FormErrors, SubmitError, ValidationError};
use anyhow::Result;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info};

pub const CURRENCY_FORM_NOTICE: &str = "This form is only intended for creating custom currencies. \
     Real-world currencies should be imported.";

static CURRENCY_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("Invalid regex pattern"));

static NUMERIC_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("Invalid regex pattern"));

const NAME_MAX_LENGTH: usize = 255;
const CODE_MAX_LENGTH: usize = 3;
const SYMBOL_MAX_LENGTH: usize = 4;

/// Checks that `code` is exactly three uppercase ASCII letters.
pub fn check_currency_code_format(code: &str) -> Result<(), ValidationError> {
    if CURRENCY_CODE_REGEX.is_match(code) {
        Ok(())
    } else {
        Err(ValidationError::Format(
            "The currency code must consist of three uppercase letters.".to_string(),
        ))
    }
}

/// Checks that `code` is exactly three ASCII digits. An empty code passes.
pub fn check_numeric_code_format(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() || NUMERIC_CODE_REGEX.is_match(code) {
        Ok(())
    } else {
        Err(ValidationError::Format(
            "The numeric code must consist of three digits.".to_string(),
        ))
    }
}

/// Format and uniqueness rules for currency codes.
#[derive(Clone)]
pub struct CurrencyValidator {
    storage: Arc<dyn EntityStorage<Currency>>,
}

impl CurrencyValidator {
    pub fn new(storage: Arc<dyn EntityStorage<Currency>>) -> Self {
        Self { storage }
    }

    pub async fn currency_code_in_use(&self, code: &str) -> Result<bool> {
        Ok(self.storage.load(code).await?.is_some())
    }

    pub async fn numeric_code_in_use(&self, code: &str) -> Result<bool> {
        let loaded = self
            .storage
            .load_by_properties(&[("numericCode", code)])
            .await?;
        Ok(!loaded.is_empty())
    }

    pub async fn validate_currency_code(
        &self,
        candidate: &str,
        is_new: bool,
    ) -> Result<(), ElementError> {
        check_currency_code_format(candidate)?;
        if is_new && self.currency_code_in_use(candidate).await? {
            debug!(candidate, "Currency code already in use");
            return Err(ValidationError::Duplicate(
                "The currency code is already in use.".to_string(),
            )
            .into());
        }
        Ok(())
    }

    pub async fn validate_numeric_code(
        &self,
        candidate: &str,
        is_new: bool,
    ) -> Result<(), ElementError> {
        check_numeric_code_format(candidate)?;
        if is_new && self.numeric_code_in_use(candidate).await? {
            debug!(candidate, "Numeric code already in use");
            return Err(ValidationError::Duplicate(
                "The numeric code is already in use.".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// Raw values as submitted, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyFormValues {
    pub name: String,
    pub currency_code: String,
    pub numeric_code: String,
    pub symbol: String,
    pub fraction_digits: String,
}

impl From<&Currency> for CurrencyFormValues {
    fn from(currency: &Currency) -> Self {
        Self {
            name: currency.name.clone(),
            currency_code: currency.currency_code.clone(),
            numeric_code: currency.numeric_code.clone(),
            symbol: currency.symbol.clone(),
            fraction_digits: currency.fraction_digits.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedCurrency {
    pub currency: Currency,
    pub message: String,
}

pub struct CurrencyForm {
    entity: Currency,
    is_new: bool,
    storage: Arc<dyn EntityStorage<Currency>>,
    validator: CurrencyValidator,
}

impl CurrencyForm {
    /// A form for a new, unsaved currency.
    pub fn add(storage: Arc<dyn EntityStorage<Currency>>) -> Self {
        Self {
            entity: Currency::default(),
            is_new: true,
            validator: CurrencyValidator::new(Arc::clone(&storage)),
            storage,
        }
    }

    /// A form for an existing currency.
    pub async fn edit(
        storage: Arc<dyn EntityStorage<Currency>>,
        currency_code: &str,
    ) -> Result<Self> {
        let entity = storage
            .load(currency_code)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Currency '{}' not found", currency_code))?;
        Ok(Self {
            entity,
            is_new: false,
            validator: CurrencyValidator::new(Arc::clone(&storage)),
            storage,
        })
    }

    pub fn entity(&self) -> &Currency {
        &self.entity
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Values the form starts with.
    pub fn default_values(&self) -> CurrencyFormValues {
        CurrencyFormValues::from(&self.entity)
    }

    /// Runs every field check and returns the collected errors.
    pub async fn validate(&self, values: &CurrencyFormValues) -> Result<FormErrors> {
        let mut errors = FormErrors::new();
        let currency_code = self.effective_currency_code(values);

        check_text(&mut errors, "name", "Name", &values.name, NAME_MAX_LENGTH);
        check_text(
            &mut errors,
            "currencyCode",
            "Currency code",
            currency_code,
            CODE_MAX_LENGTH,
        );
        check_text(
            &mut errors,
            "numericCode",
            "Numeric code",
            &values.numeric_code,
            CODE_MAX_LENGTH,
        );
        check_text(
            &mut errors,
            "symbol",
            "Symbol",
            &values.symbol,
            SYMBOL_MAX_LENGTH,
        );
        if values.fraction_digits.is_empty() {
            errors.set_error(
                "fractionDigits",
                ValidationError::Required {
                    field: "Fraction digits".to_string(),
                },
            );
        } else if parse_fraction_digits(&values.fraction_digits).is_none() {
            errors.set_error(
                "fractionDigits",
                ValidationError::Invalid {
                    field: "Fraction digits".to_string(),
                },
            );
        }

        match self
            .validator
            .validate_currency_code(currency_code, self.is_new)
            .await
        {
            Ok(()) => {}
            Err(ElementError::Invalid(e)) => errors.set_error("currencyCode", e),
            Err(ElementError::Storage(e)) => return Err(e),
        }
        match self
            .validator
            .validate_numeric_code(&values.numeric_code, self.is_new)
            .await
        {
            Ok(()) => {}
            Err(ElementError::Invalid(e)) => errors.set_error("numericCode", e),
            Err(ElementError::Storage(e)) => return Err(e),
        }

        Ok(errors)
    }

    /// Validates `values` and, when they pass, saves the currency.
    pub async fn submit(
        &mut self,
        values: &CurrencyFormValues,
    ) -> Result<SavedCurrency, SubmitError> {
        let errors = self.validate(values).await?;
        if errors.has_errors() {
            debug!(errors = %errors, "Currency form rejected");
            return Err(SubmitError::Invalid(errors));
        }

        let fraction_digits = parse_fraction_digits(&values.fraction_digits).ok_or_else(|| {
            anyhow::anyhow!("Invalid fraction digits: {}", values.fraction_digits)
        })?;
        let currency = Currency {
            currency_code: self.effective_currency_code(values).to_string(),
            name: values.name.clone(),
            numeric_code: values.numeric_code.clone(),
            symbol: values.symbol.clone(),
            fraction_digits,
        };
        self.storage.save(&currency).await?;
        info!(currency_code = %currency.currency_code, "Saved currency");

        let message = format!("Saved the {} currency.", currency.label());
        self.entity = currency.clone();
        self.is_new = false;
        Ok(SavedCurrency { currency, message })
    }

    /// The currency code is fixed once the currency exists.
    fn effective_currency_code<'a>(&'a self, values: &'a CurrencyFormValues) -> &'a str {
        if self.is_new {
            &values.currency_code
        } else {
            &self.entity.currency_code
        }
    }
}

fn check_text(errors: &mut FormErrors, key: &str, title: &str, value: &str, max_length: usize) {
    let len = value.chars().count();
    if value.is_empty() {
        errors.set_error(
            key,
            ValidationError::Required {
                field: title.to_string(),
            },
        );
    } else if len > max_length {
        errors.set_error(
            key,
            ValidationError::TooLong {
                field: title.to_string(),
                max: max_length,
                len,
            },
        );
    }
}

/// Accepts plain ASCII digits only, so signs like "+5" are rejected.
fn parse_fraction_digits(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStorage;

    fn storage_with_usd() -> Arc<MemoryStorage<Currency>> {
        Arc::new(MemoryStorage::with_entities([Currency::new(
            "USD",
            "US Dollar",
            "840",
            "$",
            2,
        )]))
    }

    fn validator() -> CurrencyValidator {
        CurrencyValidator::new(storage_with_usd())
    }

    fn values(code: &str, numeric: &str) -> CurrencyFormValues {
        CurrencyFormValues {
            name: "Bitcoin".to_string(),
            currency_code: code.to_string(),
            numeric_code: numeric.to_string(),
            symbol: "₿".to_string(),
            fraction_digits: "8".to_string(),
        }
    }

    #[test]
    fn test_currency_code_format() {
        assert!(check_currency_code_format("XBT").is_ok());
        for bad in ["us", "USDD", "usd", "U5D", "", " USD", "ÄBC"] {
            assert!(
                matches!(
                    check_currency_code_format(bad),
                    Err(ValidationError::Format(_))
                ),
                "expected format error for {bad:?}"
            );
        }
    }

    #[test]
    fn test_numeric_code_format() {
        assert!(check_numeric_code_format("999").is_ok());
        assert!(check_numeric_code_format("").is_ok());
        for bad in ["99", "9999", "abc", "١٢٣", "12a"] {
            assert!(
                matches!(
                    check_numeric_code_format(bad),
                    Err(ValidationError::Format(_))
                ),
                "expected format error for {bad:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_validate_currency_code_unique() {
        let validator = validator();
        assert!(validator.validate_currency_code("XBT", true).await.is_ok());

        let err = validator
            .validate_currency_code("USD", true)
            .await
            .unwrap_err();
        match err {
            ElementError::Invalid(ValidationError::Duplicate(message)) => {
                assert_eq!(message, "The currency code is already in use.")
            }
            other => panic!("Expected duplicate error, got {other:?}"),
        }

        // Existing entities may keep their own code.
        assert!(validator.validate_currency_code("USD", false).await.is_ok());
    }

    #[tokio::test]
    async fn test_validate_currency_code_format_precedes_uniqueness() {
        let validator = validator();
        for bad in ["us", "USDD", "usd"] {
            let err = validator.validate_currency_code(bad, true).await.unwrap_err();
            assert!(
                matches!(err, ElementError::Invalid(ValidationError::Format(_))),
                "expected format error for {bad:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_validate_numeric_code_unique() {
        let validator = validator();
        assert!(validator.validate_numeric_code("999", true).await.is_ok());

        let err = validator
            .validate_numeric_code("840", true)
            .await
            .unwrap_err();
        match err {
            ElementError::Invalid(ValidationError::Duplicate(message)) => {
                assert_eq!(message, "The numeric code is already in use.")
            }
            other => panic!("Expected duplicate error, got {other:?}"),
        }

        assert!(validator.validate_numeric_code("840", false).await.is_ok());
    }

    #[tokio::test]
    async fn test_validate_numeric_code_empty_on_edit() {
        let validator = validator();
        assert!(validator.validate_numeric_code("", false).await.is_ok());
    }

    #[tokio::test]
    async fn test_validate_numeric_code_format_error() {
        let validator = validator();
        let err = validator.validate_numeric_code("84", true).await.unwrap_err();
        assert!(matches!(
            err,
            ElementError::Invalid(ValidationError::Format(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_new_currency() {
        let storage = storage_with_usd();
        let mut form = CurrencyForm::add(storage.clone());
        assert!(form.is_new());

        let saved = form.submit(&values("XBT", "999")).await.unwrap();
        assert_eq!(saved.message, "Saved the Bitcoin currency.");
        assert_eq!(saved.currency.fraction_digits, 8);
        assert!(!form.is_new());

        let loaded = storage.load("XBT").await.unwrap().unwrap();
        assert_eq!(loaded, saved.currency);
    }

    #[tokio::test]
    async fn test_submit_collects_field_errors() {
        let storage = storage_with_usd();
        let mut form = CurrencyForm::add(storage.clone());

        let mut submitted = values("USD", "84");
        submitted.name = String::new();
        submitted.symbol = "DOLLAR".to_string();
        submitted.fraction_digits = "-1".to_string();

        let err = form.submit(&submitted).await.unwrap_err();
        let SubmitError::Invalid(errors) = err else {
            panic!("Expected validation errors");
        };
        assert_eq!(errors.len(), 5);
        assert!(matches!(
            errors.get("name"),
            Some(ValidationError::Required { .. })
        ));
        assert!(matches!(
            errors.get("currencyCode"),
            Some(ValidationError::Duplicate(_))
        ));
        assert!(matches!(
            errors.get("numericCode"),
            Some(ValidationError::Format(_))
        ));
        assert!(matches!(
            errors.get("symbol"),
            Some(ValidationError::TooLong { max: 4, len: 6, .. })
        ));
        assert!(matches!(
            errors.get("fractionDigits"),
            Some(ValidationError::Invalid { .. })
        ));

        // Nothing was saved
        assert_eq!(storage.load_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_rejects_signed_fraction_digits() {
        let storage = storage_with_usd();
        let mut form = CurrencyForm::add(storage.clone());
        for bad in ["+5", " 5", "5.0"] {
            let mut submitted = values("XBT", "999");
            submitted.fraction_digits = bad.to_string();
            let err = form.submit(&submitted).await.unwrap_err();
            let SubmitError::Invalid(errors) = err else {
                panic!("Expected validation errors for {bad:?}");
            };
            assert_eq!(errors.len(), 1);
            assert!(matches!(
                errors.get("fractionDigits"),
                Some(ValidationError::Invalid { .. })
            ));
        }
        assert_eq!(storage.load_all().await.unwrap().len(), 1);
    }

    #[test]
    fn test_parse_fraction_digits() {
        assert_eq!(parse_fraction_digits("8"), Some(8));
        assert_eq!(parse_fraction_digits("08"), Some(8));
        assert_eq!(parse_fraction_digits("+5"), None);
        assert_eq!(parse_fraction_digits(""), None);
        assert_eq!(parse_fraction_digits("99999999999"), None);
    }

    #[tokio::test]
    async fn test_submit_overlong_code_reports_length_first() {
        let mut form = CurrencyForm::add(storage_with_usd());
        let err = form.submit(&values("XBTC", "999")).await.unwrap_err();
        let SubmitError::Invalid(errors) = err else {
            panic!("Expected validation errors");
        };
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors.get("currencyCode"),
            Some(ValidationError::TooLong { max: 3, len: 4, .. })
        ));
    }

    #[tokio::test]
    async fn test_edit_keeps_currency_code() {
        let storage = storage_with_usd();
        let mut form = CurrencyForm::edit(storage.clone(), "USD").await.unwrap();
        assert!(!form.is_new());

        let mut submitted = form.default_values();
        assert_eq!(submitted.currency_code, "USD");
        submitted.currency_code = "XXX".to_string();
        submitted.symbol = "US$".to_string();

        let saved = form.submit(&submitted).await.unwrap();
        assert_eq!(saved.currency.currency_code, "USD");
        assert_eq!(saved.message, "Saved the US Dollar currency.");

        assert!(storage.load("XXX").await.unwrap().is_none());
        assert_eq!(storage.load("USD").await.unwrap().unwrap().symbol, "US$");
    }

    #[tokio::test]
    async fn test_edit_missing_currency_fails() {
        let result = CurrencyForm::edit(storage_with_usd(), "EUR").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_edit_requires_numeric_code() {
        let mut form = CurrencyForm::edit(storage_with_usd(), "USD").await.unwrap();
        let mut submitted = form.default_values();
        submitted.numeric_code = String::new();

        let SubmitError::Invalid(errors) = form.submit(&submitted).await.unwrap_err() else {
            panic!("Expected validation errors");
        };
        assert!(matches!(
            errors.get("numericCode"),
            Some(ValidationError::Required { .. })
        ));
    }
}
