use data_loader::MovieCatalog;
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/movies.json"));

    println!("Loading movie records from {}...\n", path.display());

    let start = Instant::now();
    let catalog = MovieCatalog::load_from_file(&path)
        .expect("Failed to load movie records");
    let elapsed = start.elapsed();

    let rated = catalog.movies().iter().filter(|m| m.rating.is_some()).count();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("Rated: {}", rated);
    println!("\nPerformance: {:.0} records/second",
             catalog.len() as f64 / elapsed.as_secs_f64());
}
