mod format;
mod gateway;
mod stdio;

pub(crate) use format::run_format_mode;
pub(crate) use gateway::run_gateway_mode;
pub(crate) use stdio::run_stdio_mode;
