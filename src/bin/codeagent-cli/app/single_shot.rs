use codeagent::agent::Agent;

/// Answer one message and return.
pub(super) async fn run(agent: &mut Agent, command: &str) {
    let reply = agent.chat(command).await;
    println!("\nAssistant: {reply}");
}
