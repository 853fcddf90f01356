pub mod master_slave;
pub mod metastability;

pub use master_slave::{MasterSlaveDemo, MasterSlavePhase, StageView};
pub use metastability::{MetastabilityDemo, SignalTrace, TraceColor};
