use super::definition::ToolDefinition;
use super::handlers::{
    execute_command_tool, list_directory_tool, read_file_tool, search_files_tool,
    write_file_tool,
};

/// Create all built-in tools in the order they are advertised to the model.
pub fn builtin_tools() -> Vec<ToolDefinition> {
    vec![
        read_file_tool(),
        write_file_tool(),
        execute_command_tool(),
        list_directory_tool(),
        search_files_tool(),
    ]
}
