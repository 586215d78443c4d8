use tally_core::models::Transaction;
use tally_features::MerchantFeatures;

/// Everything a strategy may look at for one transaction.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub transaction: &'a Transaction,
    pub features: &'a MerchantFeatures,
    /// Caller opted in to external research.
    pub use_research: bool,
}

impl<'a> ResolveContext<'a> {
    pub fn new(
        transaction: &'a Transaction,
        features: &'a MerchantFeatures,
        use_research: bool,
    ) -> Self {
        Self {
            transaction,
            features,
            use_research,
        }
    }

    pub fn merchant_pattern(&self) -> &'a str {
        &self.features.merchant_pattern
    }
}
