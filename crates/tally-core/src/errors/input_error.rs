/// Malformed or missing input. Surfaced immediately: the item cannot be classified.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("transaction id is missing")]
    MissingTransactionId,

    #[error("transaction {transaction_id} has no label")]
    MissingLabel { transaction_id: String },

    #[error("transaction {transaction_id} has a malformed amount: {value}")]
    MalformedAmount {
        transaction_id: String,
        value: String,
    },

    #[error("batch of {size} transactions exceeds the maximum of {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("feedback for transaction {transaction_id} carries no tag or type")]
    EmptyFeedback { transaction_id: String },
}
