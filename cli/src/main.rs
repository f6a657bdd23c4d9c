// dchat — Direct Chat CLI
//
// Compose a phone number and an optional message, then open the WhatsApp
// conversation through the public deep-link URL schemes. Contacts and quick
// messages live in a local database.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

use directchat_core::store::{open_database, SledStorage};
use directchat_core::{
    countries, geo, link, sheet, validate, Contact, ContactBook, OpenMethod, Platform,
    QuickMessages,
};

#[derive(Parser)]
#[command(name = "dchat")]
#[command(about = "Direct Chat — start WhatsApp conversations from your terminal", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a chat and open it in WhatsApp
    Chat {
        /// Local phone number, or a full number starting with +
        phone: Option<String>,
        /// Message to prefill in the chat
        #[arg(short, long)]
        message: Option<String>,
        /// Use a saved quick message instead (see `dchat message list`)
        #[arg(long, conflicts_with = "message")]
        message_id: Option<String>,
        /// Dial code, e.g. +34 (skips detection)
        #[arg(short, long)]
        country: Option<String>,
        /// Chat with a saved contact (id, name, or unique fragment)
        #[arg(long, conflicts_with = "phone")]
        contact: Option<String>,
        /// Open via "web" or the native "app" (desktop)
        #[arg(long)]
        method: Option<String>,
        /// Build the mobile hand-off link instead of a desktop one
        #[arg(long)]
        mobile: bool,
        /// Build the portable wa.me share link
        #[arg(long, conflicts_with = "mobile")]
        share: bool,
        /// Print the URL without launching anything
        #[arg(long)]
        dry_run: bool,
        /// Also save the number as a contact under this name
        #[arg(long, value_name = "NAME")]
        save: Option<String>,
    },
    /// Manage saved contacts
    Contact {
        #[command(subcommand)]
        action: ContactAction,
    },
    /// Manage quick messages
    Message {
        #[command(subcommand)]
        action: MessageAction,
    },
    /// Configure settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List known country dial codes
    Countries {
        /// Filter by name, ISO code, or dial code
        query: Option<String>,
    },
    /// Show contact and message counts
    Status,
}

#[derive(Subcommand)]
enum ContactAction {
    Add {
        name: String,
        phone: String,
        /// Dial code, e.g. +34 (defaults to the configured country)
        #[arg(short, long)]
        country: Option<String>,
    },
    List,
    Show {
        /// Contact id, name, or unique fragment
        contact: String,
    },
    Search {
        query: String,
    },
    Remove {
        /// Contact id, name, or unique fragment
        contact: String,
    },
    /// Restore the most recently removed contact
    Undo,
    /// Import contacts from a .csv, .xls or .xlsx file
    Import {
        file: PathBuf,
    },
    /// Export contacts to a .csv or .xlsx file
    Export {
        file: PathBuf,
    },
    /// Write an example spreadsheet to fill in before importing
    Template {
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum MessageAction {
    Add {
        text: String,
    },
    List,
    Edit {
        id: String,
        text: String,
    },
    Remove {
        id: String,
    },
    /// Restore the most recently removed message
    Undo,
    /// Replace all quick messages with the language defaults
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    Set { key: String, value: String },
    Get { key: String },
    List,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            phone,
            message,
            message_id,
            country,
            contact,
            method,
            mobile,
            share,
            dry_run,
            save,
        } => cmd_chat(ChatArgs {
            phone,
            message,
            message_id,
            country,
            contact,
            method,
            mobile,
            share,
            dry_run,
            save,
        }),
        Commands::Contact { action } => cmd_contact(action),
        Commands::Message { action } => cmd_message(action),
        Commands::Config { action } => cmd_config(action),
        Commands::Countries { query } => cmd_countries(query),
        Commands::Status => cmd_status(),
    }
}

struct ChatArgs {
    phone: Option<String>,
    message: Option<String>,
    message_id: Option<String>,
    country: Option<String>,
    contact: Option<String>,
    method: Option<String>,
    mobile: bool,
    share: bool,
    dry_run: bool,
    save: Option<String>,
}

struct Stores {
    contacts: ContactBook,
    messages: QuickMessages,
}

fn open_stores(config: &config::Config) -> Result<Stores> {
    let data_dir = config.data_dir()?;
    let db = open_database(&data_dir.join("directchat.db"))
        .context("Failed to open the Direct Chat database")?;

    let contacts = ContactBook::new(Arc::new(SledStorage::tree(&db, "contacts")?));
    let messages = QuickMessages::new(Arc::new(SledStorage::tree(&db, "messages")?));

    // First run: quick messages start from the locale defaults
    messages.seed(config.language())?;

    Ok(Stores { contacts, messages })
}

fn cmd_chat(args: ChatArgs) -> Result<()> {
    let config = config::Config::load()?;
    let stores = open_stores(&config)?;

    let (local_phone, contact_dial) = match &args.contact {
        Some(query) => {
            let contact = stores.contacts.resolve(query)?;
            println!(
                "{} {} ({})",
                "Contact:".bold(),
                contact.name.bright_cyan(),
                contact.display_number()
            );
            (contact.phone, contact.country_code)
        }
        None => {
            let phone = args
                .phone
                .clone()
                .context("A phone number or --contact is required")?;
            (phone, None)
        }
    };

    let message_text = match (&args.message, &args.message_id) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(id)) => {
            let msg = stores
                .messages
                .get(id)?
                .with_context(|| format!("No quick message with id {id}"))?;
            Some(msg.text)
        }
        (None, None) => None,
    };

    let dial_code = resolve_dial_code(&args, contact_dial, &config, &local_phone);

    let full = link::full_phone(&local_phone, &dial_code);
    validate::validate_phone(&full)?;
    if let Some(text) = &message_text {
        validate::validate_message(text)?;
    }
    let phone = link::clean_phone(&full);

    let url = if args.share {
        link::share_url(&phone, message_text.as_deref())
    } else {
        let platform = if args.mobile {
            Platform::Mobile
        } else {
            Platform::Desktop
        };
        let method = match &args.method {
            Some(m) => m.parse::<OpenMethod>().map_err(anyhow::Error::msg)?,
            None => config.open_method(),
        };
        link::chat_url(&phone, message_text.as_deref(), platform, method)
    };
    tracing::debug!("built deep link: {url}");

    if let Some(name) = args.save {
        validate::validate_name(&name)?;
        // A full +-prefixed number is stored as typed; the dial code is only
        // known when we composed the number ourselves.
        let contact = if local_phone.starts_with('+') {
            Contact::new(name.clone(), local_phone.clone(), None)
        } else {
            Contact::new(name.clone(), local_phone.clone(), Some(dial_code.clone()))
        };
        match stores.contacts.add(contact) {
            Ok(()) => println!("{} Contact saved: {}", "✓".green(), name.bright_cyan()),
            Err(e) => println!("{} Contact not saved: {}", "✗".red(), e),
        }
    }

    println!("{}", url.bright_green());

    if args.dry_run {
        return Ok(());
    }

    open::that(&url).with_context(|| format!("Failed to open {url}"))?;
    println!("{} Chat opened in WhatsApp", "✓".green());

    Ok(())
}

fn resolve_dial_code(
    args: &ChatArgs,
    contact_dial: Option<String>,
    config: &config::Config,
    local_phone: &str,
) -> String {
    if let Some(dial) = &args.country {
        return dial.clone();
    }
    if let Some(dial) = contact_dial {
        return dial;
    }
    // A full number needs no dial code; skip the network round trip
    if !local_phone.starts_with('+') && config.detect_country {
        if let Some(dial) = geo::detect_dial_code() {
            let name = countries::by_dial(&dial).map(|c| c.name).unwrap_or("?");
            println!("{} Detected country: {} ({})", "✓".green(), name, dial);
            return dial;
        }
    }
    config.default_country.clone()
}

fn cmd_contact(action: ContactAction) -> Result<()> {
    let config = config::Config::load()?;
    let stores = open_stores(&config)?;
    let contacts = stores.contacts;

    match action {
        ContactAction::Add { name, phone, country } => {
            validate::validate_name(&name)?;
            let dial = country.unwrap_or_else(|| config.default_country.clone());
            validate::validate_phone(&link::full_phone(&phone, &dial))?;

            let contact = Contact::new(name.clone(), phone, Some(dial));
            contacts.add(contact)?;

            println!("{} Contact saved: {}", "✓".green(), name.bright_cyan());
        }

        ContactAction::List => {
            let list = contacts.list()?;

            if list.is_empty() {
                println!("{}", "No contacts yet.".dimmed());
            } else {
                println!("{} ({} total)", "Contacts".bold(), list.len());
                println!();

                for contact in list {
                    println!("  {} {}", "•".bright_green(), contact.name.bright_cyan());
                    println!(
                        "    {}  {}",
                        contact.display_number(),
                        contact.id.dimmed()
                    );
                }
            }
        }

        ContactAction::Show { contact: query } => {
            let contact = contacts.resolve(&query)?;

            println!("{}", "Contact Details".bold());
            println!("  Name:    {}", contact.name.bright_cyan());
            println!("  Number:  {}", contact.display_number());
            println!("  Id:      {}", contact.id);
            println!("  Added:   {}", format_timestamp(contact.added_at));
        }

        ContactAction::Search { query } => {
            let results = contacts.find(&query)?;

            if results.is_empty() {
                println!("{}", "No matching contacts.".dimmed());
            } else {
                println!("{} ({} matches)", "Search Results".bold(), results.len());
                println!();

                for contact in results {
                    println!("  {} {}", "•".bright_green(), contact.name.bright_cyan());
                    println!("    {}", contact.display_number().dimmed());
                }
            }
        }

        ContactAction::Remove { contact: query } => {
            let contact = contacts.resolve(&query)?;
            let removed = contacts.remove(&contact.id)?;

            println!(
                "{} Removed contact: {}",
                "✓".green(),
                removed.name.bright_cyan()
            );
            println!("  Undo with: {}", "dchat contact undo".bright_green());
        }

        ContactAction::Undo => match contacts.restore_last()? {
            Some(contact) => println!(
                "{} Restored contact: {}",
                "✓".green(),
                contact.name.bright_cyan()
            ),
            None => println!("{}", "Nothing to undo.".dimmed()),
        },

        ContactAction::Import { file } => {
            let batch = sheet::read_contacts(&file)?;
            let offered = batch.len();
            let report = contacts.import(batch)?;

            println!("{} Import finished ({} rows read)", "✓".green(), offered);
            println!("  Added:   {}", report.added.to_string().bright_green());
            println!("  Skipped: {} (already saved or duplicated)", report.skipped);
        }

        ContactAction::Export { file } => {
            let list = contacts.list()?;
            sheet::write_contacts(&file, &list)?;

            println!(
                "{} Exported {} contacts to {}",
                "✓".green(),
                list.len(),
                file.display().to_string().bright_cyan()
            );
        }

        ContactAction::Template { file } => {
            sheet::write_template(&file)?;
            println!(
                "{} Template written to {}",
                "✓".green(),
                file.display().to_string().bright_cyan()
            );
        }
    }

    Ok(())
}

fn cmd_message(action: MessageAction) -> Result<()> {
    let config = config::Config::load()?;
    let stores = open_stores(&config)?;
    let messages = stores.messages;

    match action {
        MessageAction::Add { text } => {
            let message = messages.add(&text)?;
            println!("{} Message added ({})", "✓".green(), message.id.dimmed());
        }

        MessageAction::List => {
            let list = messages.list()?;

            if list.is_empty() {
                println!("{}", "No quick messages.".dimmed());
            } else {
                println!("{} ({} total)", "Quick Messages".bold(), list.len());
                println!();

                for message in list {
                    let marker = if message.is_default {
                        "•".bright_green()
                    } else {
                        "•".bright_cyan()
                    };
                    println!("  {} {}", marker, message.text);
                    println!("    {}", message.id.dimmed());
                }
            }
        }

        MessageAction::Edit { id, text } => {
            let message = messages.edit(&id, &text)?;
            println!("{} Message updated: {}", "✓".green(), message.text);
        }

        MessageAction::Remove { id } => {
            let removed = messages.remove(&id)?;
            println!("{} Removed message: {}", "✓".green(), removed.text);
            println!("  Undo with: {}", "dchat message undo".bright_green());
        }

        MessageAction::Undo => match messages.restore_last()? {
            Some(message) => println!("{} Restored message: {}", "✓".green(), message.text),
            None => println!("{}", "Nothing to undo.".dimmed()),
        },

        MessageAction::Reset { yes } => {
            if !yes && !confirm("Replace ALL quick messages with the defaults?")? {
                println!("{}", "Reset cancelled.".dimmed());
                return Ok(());
            }

            let seeded = messages.reset(config.language())?;
            println!("{} Quick messages reset ({} defaults)", "✓".green(), seeded);
        }
    }

    Ok(())
}

fn cmd_config(action: ConfigAction) -> Result<()> {
    let mut config = config::Config::load()?;

    match action {
        ConfigAction::Set { key, value } => {
            let language_before = config.language();
            config.set(&key, &value)?;
            println!("{} Set {} = {}", "✓".green(), key.bright_cyan(), value);

            // Language switches rewrite the seeded defaults in place
            if key == "language" {
                let language = config.language();
                if language != language_before {
                    let stores = open_stores(&config)?;
                    let rewritten = stores.messages.relocalize(language)?;
                    if rewritten > 0 {
                        println!(
                            "{} Translated {} default quick messages to {}",
                            "✓".green(),
                            rewritten,
                            language
                        );
                    }
                }
            }
        }

        ConfigAction::Get { key } => {
            if let Some(value) = config.get(&key) {
                println!("{} = {}", key.bright_cyan(), value);
            } else {
                anyhow::bail!("Unknown config key: {}", key);
            }
        }

        ConfigAction::List => {
            println!("{}", "Configuration".bold());
            println!();

            for (key, value) in config.list() {
                println!("  {:<18} {}", key.bright_cyan(), value);
            }
        }
    }

    Ok(())
}

fn cmd_countries(query: Option<String>) -> Result<()> {
    let query_lower = query.map(|q| q.to_lowercase());

    let matches: Vec<_> = countries::all()
        .iter()
        .filter(|c| match &query_lower {
            Some(q) => {
                c.name.to_lowercase().contains(q)
                    || c.iso.eq_ignore_ascii_case(q)
                    || c.dial.contains(q.as_str())
            }
            None => true,
        })
        .collect();

    if matches.is_empty() {
        println!("{}", "No matching countries.".dimmed());
        return Ok(());
    }

    for country in matches {
        println!(
            "  {} {:<24} {:<6} {}  e.g. {}",
            country.flag,
            country.name,
            country.dial.bright_cyan(),
            country.iso.dimmed(),
            country.placeholder.dimmed()
        );
    }

    Ok(())
}

fn cmd_status() -> Result<()> {
    let config = config::Config::load()?;
    let stores = open_stores(&config)?;

    println!("{}", "Direct Chat Status".bold());
    println!();
    println!("Contacts:       {}", stores.contacts.count());
    println!("Quick messages: {}", stores.messages.count());
    println!("Language:       {}", config.language());
    println!("Country:        {}", config.default_country);
    println!("Open method:    {}", config.open_method);

    Ok(())
}

fn format_timestamp(timestamp: u64) -> String {
    use chrono::{DateTime, Local, Utc};

    let dt = DateTime::from_timestamp(timestamp as i64, 0).unwrap_or_else(Utc::now);
    let local: DateTime<Local> = dt.into();

    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn confirm(prompt: &str) -> Result<bool> {
    use std::io::Write;

    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}
