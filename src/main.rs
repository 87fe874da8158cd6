#[tokio::main]
async fn main() -> std::io::Result<()> {
    todo_server::start().await
}
