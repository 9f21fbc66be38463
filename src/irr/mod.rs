//! Internal Rate of Return (IRR) and XIRR
//!
//! Both solvers share one Newton-Raphson routine; IRR discounts flow `t` by
//! `(1+r)^t` while XIRR uses elapsed years between actual dates.

mod dated;
mod periodic;
mod solver;

pub use dated::{calculate_xirr, solve_xirr, xnpv, DatedCashFlow, XirrInput, XirrResult};
pub use periodic::{annualize, calculate_irr, npv, solve_irr, IrrInput, IrrResult};
pub use solver::SolverConfig;
