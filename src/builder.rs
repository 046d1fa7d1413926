#[path = "builder/gateway_builder.rs"]
mod gateway_builder;

#[path = "builder/tools.rs"]
mod tools;

pub use gateway_builder::GatewayBuilder;
pub use tools::{FunctionBuilder, ParamBuilder};
