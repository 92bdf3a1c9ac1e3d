pub mod amount;
pub mod balance;
pub mod form;
pub mod quote;
pub mod swap;
pub mod token;
