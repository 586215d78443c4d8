//! Payment-method prefixes ("CB", "PRLV SEPA", "VIR", ...) found at the start of labels.

use serde::{Deserialize, Serialize};

/// How the money moved, as announced by the label prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    DirectDebit,
    Transfer,
    Withdrawal,
    Cheque,
}

impl PaymentMethod {
    /// Contextual lean in [-1, +1]: positive for FIXED-looking payment rails.
    pub fn context_lean(self) -> f64 {
        match self {
            Self::DirectDebit => 1.0,
            Self::Transfer => 0.5,
            Self::Card | Self::Withdrawal => -1.0,
            Self::Cheque => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::DirectDebit => "direct_debit",
            Self::Transfer => "transfer",
            Self::Withdrawal => "withdrawal",
            Self::Cheque => "cheque",
        }
    }
}

/// Token sequences stripped from the start of a label, longest first per family.
pub(crate) const PREFIX_SEQUENCES: &[(&[&str], Option<PaymentMethod>)] = &[
    (&["paiement", "par", "carte"], Some(PaymentMethod::Card)),
    (&["paiement", "carte"], Some(PaymentMethod::Card)),
    (&["paiement", "cb"], Some(PaymentMethod::Card)),
    (&["facture", "carte"], Some(PaymentMethod::Card)),
    (&["achat", "cb"], Some(PaymentMethod::Card)),
    (&["carte"], Some(PaymentMethod::Card)),
    (&["cb"], Some(PaymentMethod::Card)),
    (&["card"], Some(PaymentMethod::Card)),
    (&["pos"], Some(PaymentMethod::Card)),
    (&["prlv", "sepa"], Some(PaymentMethod::DirectDebit)),
    (&["prelevement", "sepa"], Some(PaymentMethod::DirectDebit)),
    (&["sepa", "dd"], Some(PaymentMethod::DirectDebit)),
    (&["direct", "debit"], Some(PaymentMethod::DirectDebit)),
    (&["prlv"], Some(PaymentMethod::DirectDebit)),
    (&["prelevement"], Some(PaymentMethod::DirectDebit)),
    (&["dd"], Some(PaymentMethod::DirectDebit)),
    (&["vir", "sepa"], Some(PaymentMethod::Transfer)),
    (&["vir", "inst"], Some(PaymentMethod::Transfer)),
    (&["virement", "sepa"], Some(PaymentMethod::Transfer)),
    (&["sepa", "ct"], Some(PaymentMethod::Transfer)),
    (&["virement"], Some(PaymentMethod::Transfer)),
    (&["vir"], Some(PaymentMethod::Transfer)),
    (&["transfer"], Some(PaymentMethod::Transfer)),
    (&["retrait", "dab"], Some(PaymentMethod::Withdrawal)),
    (&["retrait"], Some(PaymentMethod::Withdrawal)),
    (&["atm"], Some(PaymentMethod::Withdrawal)),
    (&["cheque"], Some(PaymentMethod::Cheque)),
    (&["chq"], Some(PaymentMethod::Cheque)),
    (&["sepa"], None),
];

/// Strip every leading prefix sequence.
///
/// Returns the index of the first merchant token and the outermost
/// payment method found.
pub(crate) fn strip_prefixes(tokens: &[&str]) -> (usize, Option<PaymentMethod>) {
    let mut start = 0;
    let mut method = None;
    'outer: while start < tokens.len() {
        for (sequence, seq_method) in PREFIX_SEQUENCES {
            let end = start + sequence.len();
            if end <= tokens.len() && tokens[start..end] == **sequence {
                if method.is_none() {
                    method = *seq_method;
                }
                start = end;
                continue 'outer;
            }
        }
        break;
    }
    (start, method)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_stacked_prefixes() {
        let tokens = ["prlv", "sepa", "sepa", "edf", "clients"];
        let (start, method) = strip_prefixes(&tokens);
        assert_eq!(&tokens[start..], &["edf", "clients"]);
        assert_eq!(method, Some(PaymentMethod::DirectDebit));
    }

    #[test]
    fn prefers_longest_sequence() {
        let tokens = ["paiement", "par", "carte", "fnac"];
        let (start, method) = strip_prefixes(&tokens);
        assert_eq!(start, 3);
        assert_eq!(method, Some(PaymentMethod::Card));
    }

    #[test]
    fn leaves_merchant_only_labels_alone() {
        let tokens = ["netflix"];
        assert_eq!(strip_prefixes(&tokens), (0, None));
    }
}
