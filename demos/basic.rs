//! Basic example demonstrating the Marketo API client.
//!
//! Run with:
//! ```
//! MARKETO_MUNCHKIN_ID=123-ABC-456 \
//! MARKETO_CLIENT_ID=your-client-id \
//! MARKETO_CLIENT_SECRET=your-client-secret \
//! cargo run --example basic -- jane@example.com
//! ```

use mktoapi::{Describe, FilterQuery, MarketoClient, QueryRecords};

#[tokio::main]
async fn main() -> mktoapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let email = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "jane@example.com".to_string());

    // Create client from environment variables
    println!("Creating Marketo client...");
    let client = MarketoClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // Lead field metadata
    println!("\n--- Lead Fields ---");
    let description = client.leads().describe().await?;
    let fields = description["result"].as_array().cloned().unwrap_or_default();
    println!("Found {} lead fields", fields.len());

    for field in fields.iter().take(10) {
        let name = field["rest"]["name"].as_str().unwrap_or("unknown");
        let data_type = field["dataType"].as_str().unwrap_or("unknown");
        println!("  - {name} ({data_type})");
    }

    // Leads by email
    println!("\n--- Leads with email {email} ---");
    let query = FilterQuery::new("email", [email.as_str()])
        .fields(["id", "email", "firstName", "lastName", "updatedAt"]);
    let response = client.leads().query(&query).await?;

    if response["success"] == false {
        println!("Request failed: {}", response["errors"]);
    } else {
        let leads = response["result"].as_array().cloned().unwrap_or_default();
        println!("Found {} leads", leads.len());
        for lead in &leads {
            println!(
                "  {} {} <{}> (id {}, updated {})",
                lead["firstName"].as_str().unwrap_or(""),
                lead["lastName"].as_str().unwrap_or(""),
                lead["email"].as_str().unwrap_or(""),
                lead["id"],
                lead["updatedAt"].as_str().unwrap_or("unknown"),
            );
        }
    }

    if let Some(token) = client.token_manager().current().await {
        println!("\nAccess token valid until {}", token.expires_at());
    }

    println!("\nDone!");
    Ok(())
}
