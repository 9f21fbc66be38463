//! Systematic flow simulators (SIP, SWP and step-up variants)

mod engine;
mod result;
mod sip;
mod state;
mod swp;

pub use engine::{FlowDirection, FlowSimulator, SimulationConfig, StepUp};
pub use result::{FlowResult, PeriodRow};
pub use sip::{calculate_sip, SipInput, SipResult};
pub use state::FlowState;
pub use swp::{calculate_swp, SwpInput, SwpResult};
