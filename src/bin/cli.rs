use campusbyte::cli::{connect, create_admin, run_migrations};
use campusbyte_config::{ProvisioningConfig, StoreConfig};
use campusbyte_models::users::AdminProfileDto;
use campusbyte_models::value_types::Gender;
use campusbyte_observability::init_basic_console_logging;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "campusbyte-cli")]
#[command(about = "Campusbyte CLI - Administrative tools for Campusbyte", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin account
    CreateAdmin {
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        #[arg(short = 'd', long)]
        designation: Option<String>,

        /// Contact number, 10 to 15 digits
        #[arg(short = 'c', long)]
        contact_no: Option<String>,

        #[arg(short = 'a', long)]
        address: Option<String>,

        /// Password (prompted securely if not provided, empty uses DEFAULT_PASS)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_basic_console_logging();

    let cli = Cli::parse();
    let pool = connect(StoreConfig::from_env().database_url).await?;

    match cli.command {
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            designation,
            contact_no,
            address,
            password,
        } => {
            let first_name = prompt_unless_given(first_name, "First name")?;
            let last_name = prompt_unless_given(last_name, "Last name")?;
            let email = prompt_unless_given(email, "Email address")?;
            let designation = prompt_unless_given(designation, "Designation")?;
            let contact_no = prompt_unless_given(contact_no, "Contact number")?;
            let address = prompt_unless_given(address, "Address")?;
            let gender = prompt_gender()?;
            let password = match password {
                Some(password) => password,
                None => Password::new()
                    .with_prompt("Password (leave empty for the default)")
                    .allow_empty_password(true)
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()?,
            };

            let profile = AdminProfileDto {
                designation,
                first_name,
                middle_name: None,
                last_name,
                gender,
                date_of_birth: None,
                email: email.clone(),
                emergency_contact_no: contact_no.clone(),
                contact_no,
                present_address: address.clone(),
                permanent_address: address,
            };

            let config = ProvisioningConfig::from_env();
            match create_admin(pool, &config, Some(password.as_str()), profile).await {
                Ok(account) => {
                    println!("\n✅ Admin created successfully!");
                    println!("   Login ID: {}", account.user.login_id);
                    println!("   Email: {}", email);
                    if account.user.needs_password_change {
                        println!("   The default password was used and must be changed.");
                    }
                }
                Err(e) => {
                    eprintln!("\n❌ Error creating admin: {}", e.message());
                    std::process::exit(1);
                }
            }
        }
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("✅ Migrations applied");
        }
    }

    Ok(())
}

fn prompt_unless_given(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

fn prompt_gender() -> anyhow::Result<Gender> {
    let options = [Gender::Male, Gender::Female, Gender::Other];
    let labels: Vec<&str> = options.iter().map(|g| g.as_str()).collect();
    let index = Select::new()
        .with_prompt("Gender")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(options[index])
}
