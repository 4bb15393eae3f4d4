use colored::*;
use governor::{Quota, RateLimiter};
use hdrhistogram::Histogram;
use reqwest::Client;
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use uuid::Uuid;

const DURATION_SECS: u64 = 20;
const DEFAULT_BASE_URL: &str = "http://localhost:3001";

struct Target {
    name: &'static str,
    method: &'static str,
    url: String,
    bearer: Option<String>,
}

#[tokio::main]
async fn main() {
    let base_url = std::env::var("BENCH_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    println!("{}", "🚀 Starting Benchmark Suite".bold().green());
    println!("Target URL: {}", base_url);

    let client = Client::builder()
        .pool_max_idle_per_host(1000)
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    if client.get(format!("{}/health", base_url)).send().await.is_err() {
        eprintln!("{}", format!("❌ Server is NOT reachable at {}. Please start it first.", base_url).red().bold());
        return;
    }

    println!("\n{}", "⚙️  Setting up benchmark data...".yellow());
    let token = setup_user(&client, &base_url).await;
    let recipe_id = setup_recipe(&client, &base_url, &token).await;

    println!("{}", "✅ Data created successfully.".green());
    println!("   Recipe ID: {}", recipe_id);

    let targets = vec![
        Target {
            name: "Health Check (Public)",
            method: "GET",
            url: format!("{}/health", base_url),
            bearer: None,
        },
        Target {
            name: "List Recipes (Public Read)",
            method: "GET",
            url: format!("{}/api/v1/recipes?sortBy=createdAt&sortOrder=descending", base_url),
            bearer: None,
        },
        Target {
            name: "Popular Recipes (Ranking)",
            method: "GET",
            url: format!("{}/api/v1/recipes-popular?limit=10", base_url),
            bearer: None,
        },
        Target {
            name: "Like Recipe (Atomic Write)",
            method: "POST",
            url: format!("{}/api/v1/recipes/{}/like", base_url, recipe_id),
            bearer: Some(token.clone()),
        },
    ];

    let rps_stages = vec![10, 50, 200, 1000];

    for target in targets {
        println!("\n{}", "=".repeat(60));
        println!("Benchmarking Endpoint: {}", target.name.cyan().bold());
        println!("URL: {}", target.url);
        println!("{}", "=".repeat(60));

        println!("{:<10} | {:<15} | {:<15} | {:<15}", "RPS", "Mean (ms)", "P99 (ms)", "Success Rate");
        println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<15}", "", "", "", "");

        for &rps in &rps_stages {
            run_stage(&client, &target, rps).await;
        }
    }
}

async fn setup_user(client: &Client, base_url: &str) -> String {
    let username = format!("bench-{}", Uuid::new_v4());
    let password = "benchmark-password";

    let res = client.post(format!("{}/api/v1/user/signup", base_url))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to send signup request");

    if !res.status().is_success() {
        panic!("Failed to create user: status {}", res.status());
    }

    let login_res = client.post(format!("{}/api/v1/user/login", base_url))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Login failed during setup");

    if !login_res.status().is_success() {
        panic!("Login failed. Status: {}", login_res.status());
    }

    let body: Value = login_res.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token").to_string()
}

async fn setup_recipe(client: &Client, base_url: &str, token: &str) -> String {
    let res = client.post(format!("{}/api/v1/recipes", base_url))
        .bearer_auth(token)
        .json(&json!({
            "title": "Benchmark Bread",
            "contents": "Flour, water, patience.",
            "ingredients": ["500g flour", "350ml water", "10g salt"],
            "tags": ["bench", "bread"]
        }))
        .send()
        .await
        .expect("Failed to create recipe");

    if !res.status().is_success() {
        let status = res.status();
        let txt = res.text().await.unwrap_or_default();
        panic!("Failed to create recipe. Status: {}. Body: {}", status, txt);
    }

    let body: Value = res.json().await.expect("Failed to parse recipe response");
    body["id"].as_str().expect("No recipe id").to_string()
}

async fn run_stage(client: &Client, target: &Target, rps: u32) {
    let limiter = Arc::new(RateLimiter::direct(
        Quota::per_second(NonZeroU32::new(rps).unwrap())
    ));

    let (tx, mut rx) = mpsc::channel(50000);
    let start_time = Instant::now();
    let duration = Duration::from_secs(DURATION_SECS);

    loop {
        if start_time.elapsed() > duration {
            break;
        }

        if limiter.check().is_ok() {
            let client = client.clone();
            let url = target.url.clone();
            let bearer = target.bearer.clone();
            let method = target.method;
            let tx = tx.clone();

            tokio::spawn(async move {
                let req_start = Instant::now();
                let mut req = match method {
                    "POST" => client.post(&url),
                    _ => client.get(&url),
                };
                if let Some(token) = bearer {
                    req = req.bearer_auth(token);
                }
                let res = req.send().await;
                let latency = req_start.elapsed();

                let success = match res {
                    Ok(r) => r.status().is_success(),
                    Err(_) => false,
                };

                let _ = tx.send((latency, success)).await;
            });
        } else {
            tokio::task::yield_now().await;
        }
    }

    drop(tx);

    let mut histogram = Histogram::<u64>::new(3).unwrap();
    let mut successes = 0;
    let mut total = 0;

    while let Some((latency, success)) = rx.recv().await {
        total += 1;
        if success { successes += 1; }
        histogram.record(latency.as_micros() as u64).unwrap();
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;
    let success_rate = if total > 0 { (successes as f64 / total as f64) * 100.0 } else { 0.0 };

    println!(
        "{:<10} | {:<15.2} | {:<15.2} | {:<14.1}%",
        rps,
        mean_ms,
        p99_ms,
        success_rate
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
}
