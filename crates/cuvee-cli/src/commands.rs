use std::time::Duration;

use colored::Colorize;
use cuvee_client::{key, LabelClient, LabelRecord};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let signer = key::load_signer(cli.keyfile.as_deref())?;
    let client = LabelClient::new(cli.url, signer);

    match cli.command {
        Command::Set(args) => cmd_set(&client, args).await,
        Command::Delete(args) => cmd_delete(&client, args).await,
        Command::List => cmd_list(&client).await,
        Command::Show(args) => cmd_show(&client, args).await,
    }
}

async fn cmd_set(client: &LabelClient, args: SetArgs) -> anyhow::Result<()> {
    let record = LabelRecord {
        id: args.id,
        printed_at: args.printed_at,
        longitude: args.longitude,
        latitude: args.latitude,
    };
    let outcome = client
        .set(&record, Duration::from_secs(args.wait))
        .await?;
    println!(
        "{} Label {} submitted (batch {})",
        "✓".green().bold(),
        record.id.yellow(),
        &outcome.batch_id[..16].dimmed()
    );
    println!("  Status: {}", outcome.status.to_string().cyan());
    Ok(())
}

async fn cmd_delete(client: &LabelClient, args: DeleteArgs) -> anyhow::Result<()> {
    let outcome = client
        .delete(&args.id, Duration::from_secs(args.wait))
        .await?;
    println!(
        "{} Label {} tombstoned (batch {})",
        "✓".green().bold(),
        args.id.yellow(),
        &outcome.batch_id[..16].dimmed()
    );
    println!("  Status: {}", outcome.status.to_string().cyan());
    Ok(())
}

async fn cmd_list(client: &LabelClient) -> anyhow::Result<()> {
    let records = client.list().await?;
    if records.is_empty() {
        println!("No labels in the namespace.");
        return Ok(());
    }
    for record in records {
        if record.is_tombstone() {
            println!("{}", "(deleted)".dimmed());
        } else {
            print_record(&record);
        }
    }
    Ok(())
}

async fn cmd_show(client: &LabelClient, args: ShowArgs) -> anyhow::Result<()> {
    let record = client.show(&args.id).await?;
    if record.is_tombstone() {
        println!("Label {} is deleted.", args.id.yellow());
    } else {
        print_record(&record);
    }
    Ok(())
}

fn print_record(record: &LabelRecord) {
    println!(
        "{}  printed at {}  ({}, {})",
        record.id.yellow().bold(),
        record.printed_at,
        record.longitude,
        record.latitude,
    );
}
