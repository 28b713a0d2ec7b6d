use embassy_time::Duration;

/// Time to wait for the final `OK` of a command
pub const fn command_timeout() -> Duration {
    Duration::from_millis(2000)
}

/// Time to wait for `READY` after power on, SIM and network bring up included
pub const fn ready_timeout() -> Duration {
    Duration::from_secs(60)
}
