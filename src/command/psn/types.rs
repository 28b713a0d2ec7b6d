use atat::atat_derive::{AtatEnum, AtatLen};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, AtatLen)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ContextId(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GprsAttachedState {
    Detached = 0,
    Attached = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PdpContextStatus {
    Deactivated = 0,
    Activated = 1,
}
