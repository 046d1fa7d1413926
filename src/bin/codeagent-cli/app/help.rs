use codeagent::tools::ToolRegistry;

const HELP_TEXT: &str = "
Code Agent help

Commands:
  help     - show this help
  quit     - exit (also: exit, bye)
  reset    - clear the conversation history
  clear    - clear the screen

Ctrl-C interrupts a running request; at the prompt it exits.

Examples:
  \"list the files in the current directory\"
  \"show me the contents of main.py\"
  \"create test.py with a Hello World program\"
  \"search the project for lines containing 'import'\"
  \"run python --version\"
  \"review this function and point out potential bugs\"
";

pub(super) fn print_help(registry: &ToolRegistry) {
    println!("{HELP_TEXT}");
    println!("Tools: {}", registry.tool_names().join(", "));
}
