use crate::errors::CoreError;
use crate::models::holding::{normalize_symbol, AssetCategory, Currency, Holding};

/// Manages the live holding list: add-or-merge, update, remove.
///
/// Pure business logic — no I/O. The facade owns the `Vec<Holding>` and
/// passes it in, mirroring how snapshots later take a deep copy of it.
pub struct HoldingService;

impl HoldingService {
    pub fn new() -> Self {
        Self
    }

    /// Add a holding, merging into an existing row when one already
    /// covers the same (symbol, currency, category) triple.
    ///
    /// Merge semantics: the existing row's value grows by `value` and its
    /// identity is untouched. Otherwise a new row is appended with a
    /// fresh id. Returns the id of the affected row.
    pub fn add_or_merge(
        &self,
        holdings: &mut Vec<Holding>,
        symbol: &str,
        value: f64,
        currency: Currency,
        category: AssetCategory,
    ) -> Result<String, CoreError> {
        Self::validate_value(value)?;
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Err(CoreError::InvalidValue(
                "Symbol must contain at least one alphanumeric character".into(),
            ));
        }

        if let Some(existing) = holdings
            .iter_mut()
            .find(|h| h.symbol == symbol && h.currency == currency && h.category == category)
        {
            existing.value += value;
            return Ok(existing.id.clone());
        }

        let holding = Holding::new(symbol, value, currency, category);
        let id = holding.id.clone();
        holdings.push(holding);
        Ok(id)
    }

    /// Replace every field of the holding with the given id.
    ///
    /// Deliberately performs no merge check — an update may create a
    /// duplicate (symbol, currency, category) triple.
    pub fn update(
        &self,
        holdings: &mut [Holding],
        id: &str,
        symbol: &str,
        value: f64,
        currency: Currency,
        category: AssetCategory,
    ) -> Result<(), CoreError> {
        Self::validate_value(value)?;
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Err(CoreError::InvalidValue(
                "Symbol must contain at least one alphanumeric character".into(),
            ));
        }

        let holding = holdings
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| CoreError::HoldingNotFound(id.to_string()))?;

        holding.symbol = symbol;
        holding.value = value;
        holding.currency = currency;
        holding.category = category;
        Ok(())
    }

    /// Remove the holding with the given id. Returns the removed row.
    pub fn remove(&self, holdings: &mut Vec<Holding>, id: &str) -> Result<Holding, CoreError> {
        let idx = holdings
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| CoreError::HoldingNotFound(id.to_string()))?;
        Ok(holdings.remove(idx))
    }

    fn validate_value(value: f64) -> Result<(), CoreError> {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::InvalidValue(format!(
                "Holding value must be a non-negative number, got {value}"
            )));
        }
        Ok(())
    }
}

impl Default for HoldingService {
    fn default() -> Self {
        Self::new()
    }
}
