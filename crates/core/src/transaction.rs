//! Transaction enumerations.

use crate::labels::labelled_enum;

labelled_enum! {
    TransactionType ("transaction_type") {
        Charge => "charge",
        Payout => "payout",
        Refund => "refund",
    }
}

labelled_enum! {
    /// Processing state of a scheduled transaction.
    TransactionStatus ("transaction_status") {
        Init => "init",
        Retrying => "retrying",
        Done => "done",
        Failed => "failed",
        Canceled => "canceled",
    }
}
