//! OTP login flow: the state machine and the service that drives it.

mod flow;
mod service;

pub use flow::{OtpLoginFlow, OtpLoginState};
pub use service::{AuthGateway, LoginFlowService};
