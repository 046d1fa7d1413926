mod message;
mod tool;
mod traits;

pub use message::{ChatRole, Message, ToolCallRequest};
pub use tool::{FunctionTool, ParameterProperty, ParametersSchema, Tool, ToolChoice};
pub use traits::{ChatProvider, GatewayResponse};
