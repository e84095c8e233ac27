use opap_core::{DrawsService, Game, PropoGame};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let draws = DrawsService::new()?;

    println!("Latest Joker draw\n");

    let (joker, _) = draws.latest(Game::Joker).await?;
    println!("Draw {} at {}", joker.draw_no, joker.draw_time);
    println!("  Numbers: {:?}", joker.main_numbers());
    if let Some(number) = joker.joker_number() {
        println!("  Joker: {}", number);
    }

    println!("\nKINO draws on 24-12-2017\n");

    let (kino, _) = draws.by_date(Game::Kino, 24, 12, 2017).await?;
    for draw in kino.iter().take(5) {
        println!("  {} {} {:?}", draw.draw_no, draw.draw_time, draw.results);
    }
    println!("Total {} draws that day.", kino.len());

    println!("\nLatest Saturday Propo\n");

    match draws.propo_latest(PropoGame::Sat).await {
        Ok((propo, resp)) => {
            println!("Draw {} ({})", propo.draw_no, resp.status);
            println!("  {}", propo.results.join(" "));
        }
        Err(e) => {
            println!("Request failed: {}", e);
            if let Some(status) = e.status() {
                println!("  Status: {}", status);
            }
        }
    }

    Ok(())
}
