use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{MovieCatalog, MovieRecord, MovieStore};
use server::{AnalyticsService, ApiRequest, ApiResponse, ServiceConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// movie-stats - analytics over a scraped movie table
#[derive(Parser)]
#[command(name = "movie-stats")]
#[command(about = "Counts, rankings and distributions over a movie dataset", long_about = None)]
struct Cli {
    /// Path to the movie file (.json, .jsonl or .csv)
    #[arg(short, long, default_value = "data/movies.json")]
    data: PathBuf,

    /// Print the API JSON body instead of formatted output
    #[arg(long)]
    json: bool,

    /// Per-query deadline in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List movies, one page at a time
    Movies {
        #[arg(long, default_value = "1")]
        page: i64,

        #[arg(long, default_value = "10")]
        per_page: i64,
    },

    /// Movies released in a given year (exact match)
    Year {
        year: String,
    },

    /// Most frequent actors
    TopActors {
        /// Maximum entries; zero or negative returns all
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Most frequent directors
    TopDirectors {
        /// Maximum entries; zero or negative returns all
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Film count of every genre
    Genres,

    /// Movies with a rating inside [min, max]
    ByRating {
        #[arg(long, default_value = "0")]
        min: f64,

        #[arg(long, default_value = "10")]
        max: f64,
    },

    /// Film count per release decade
    Decades,

    /// Average, distribution and extremes of the ratings
    RatingStats,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

impl Commands {
    fn to_request(&self) -> Option<ApiRequest> {
        let request = match self {
            Commands::Movies { page, per_page } => ApiRequest::Movies {
                page: *page,
                per_page: *per_page,
            },
            Commands::Year { year } => ApiRequest::MoviesByYear { year: year.clone() },
            Commands::TopActors { limit } => ApiRequest::TopActors { limit: *limit },
            Commands::TopDirectors { limit } => ApiRequest::TopDirectors { limit: *limit },
            Commands::Genres => ApiRequest::GenreCounts,
            Commands::ByRating { min, max } => ApiRequest::MoviesByRating {
                min_rating: *min,
                max_rating: *max,
            },
            Commands::Decades => ApiRequest::DecadeDistribution,
            Commands::RatingStats => ApiRequest::RatingStats,
            Commands::Benchmark { .. } => return None,
        };
        Some(request)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let catalog = MovieCatalog::load_from_file(&cli.data)
        .with_context(|| format!("Failed to load movies from {}", cli.data.display()))?;
    info!("Loaded {} movies from {}", catalog.len(), cli.data.display());
    if !cli.json {
        println!(
            "{} Loaded {} movies in {:?}",
            "✓".green(),
            catalog.len(),
            start.elapsed()
        );
    }

    let mut config = ServiceConfig::default();
    if let Some(ms) = cli.timeout_ms {
        config = config.with_query_timeout(Duration::from_millis(ms));
    }
    let store: Arc<dyn MovieStore> = Arc::new(catalog);
    let service = AnalyticsService::with_config(store, config);

    match cli.command {
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(service, requests, concurrent).await?,
        ref command => {
            let request = command
                .to_request()
                .ok_or_else(|| anyhow!("command has no matching query"))?;
            let response = service
                .respond(request)
                .await
                .map_err(|e| anyhow!("query failed ({}): {}", e.status_code(), e))?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_response(&response);
            }
        }
    }

    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    service: AnalyticsService,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        return Err(anyhow!("benchmark needs at least one request"));
    }
    if concurrent == 0 {
        warn!("Concurrency of 0 requested, running with 1");
    }

    let queries = [
        ApiRequest::TopActors { limit: Some(10) },
        ApiRequest::TopDirectors { limit: Some(10) },
        ApiRequest::GenreCounts,
        ApiRequest::DecadeDistribution,
        ApiRequest::RatingStats,
    ];

    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    let mut handles = vec![];
    for i in 0..requests {
        let service = service.clone();
        let permits = permits.clone();
        let request = queries[i % queries.len()].clone();
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            service.respond(request).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    let mut timings = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let wall_time = wall_clock.elapsed();
    info!("Benchmark finished: {} requests in {:?}", requests, wall_time);

    timings.sort();
    let total_latency: Duration = timings.iter().sum();
    let avg_latency = total_latency / (timings.len() as u32);
    let percentile = |p: f64| {
        let idx = ((timings.len() as f64 * p) as usize).min(timings.len() - 1);
        timings[idx]
    };
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent);
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn print_response(response: &ApiResponse) {
    match response {
        ApiResponse::Page(page) => {
            println!(
                "{}",
                format!(
                    "Movies (page {}, {} per page, {} total):",
                    page.page, page.per_page, page.total
                )
                .bold()
                .blue()
            );
            print_movies(&page.movies);
        }
        ApiResponse::Movies(movies) => {
            println!("{}", format!("{} movies:", movies.len()).bold().blue());
            print_movies(movies);
        }
        ApiResponse::Actors(rows) => {
            print_ranking("Top actors:", rows.iter().map(|r| (r.actor.as_str(), r.count)))
        }
        ApiResponse::Directors(rows) => print_ranking(
            "Top directors:",
            rows.iter().map(|r| (r.director.as_str(), r.count)),
        ),
        ApiResponse::Genres(rows) => {
            print_ranking("Genres:", rows.iter().map(|r| (r.genre.as_str(), r.count)))
        }
        ApiResponse::Decades(rows) => {
            println!("{}", "Movies per decade:".bold().blue());
            for row in rows {
                println!("  {:>6}  {}", row.decade, row.count);
            }
        }
        ApiResponse::RatingStats(stats) => {
            println!("{}", "Rating statistics:".bold().blue());
            println!("{}Average rating: {:.2}", "• ".cyan(), stats.average_rating);
            match &stats.highest_rated {
                Some(movie) => println!("{}Highest rated: {} ({})", "• ".cyan(), movie.title, movie.rating),
                None => println!("{}Highest rated: -", "• ".cyan()),
            }
            match &stats.lowest_rated {
                Some(movie) => println!("{}Lowest rated: {} ({})", "• ".cyan(), movie.title, movie.rating),
                None => println!("{}Lowest rated: -", "• ".cyan()),
            }
            println!("Distribution:");
            for bucket in &stats.rating_distribution.0 {
                println!("  {:>5}  {}", bucket.label, bucket.count);
            }
        }
    }
}

fn print_ranking<'a>(header: &str, rows: impl Iterator<Item = (&'a str, usize)>) {
    println!("{}", header.bold().blue());
    for (rank, (token, count)) in rows.enumerate() {
        println!("{}. {} ({})", (rank + 1).to_string().green(), token, count);
    }
}

fn print_movies(movies: &[MovieRecord]) {
    for movie in movies {
        let rating = movie
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}: {} ({}) [{}] - Rating: {}",
            movie.id,
            movie.title,
            movie.release_date.as_deref().unwrap_or("????"),
            movie.genres.as_deref().unwrap_or(""),
            rating
        );
    }
}
