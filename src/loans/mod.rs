//! Loan EMI calculators (home, business, personal, vehicle)

mod emi;

pub use emi::{calculate_loan, emi, LoanInput, LoanKind, LoanResult};
