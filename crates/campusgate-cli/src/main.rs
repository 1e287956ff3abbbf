use campusgate_access::{AccessOptions, Catalog, Department, Role, filter_options};
use campusgate_cli::seeder::{self, SeedConfig};
use campusgate_config::DatabaseConfig;
use campusgate_core::errors::field_errors;
use campusgate_db::{PgPool, init_db_pool, run_migrations};
use campusgate_models::users::{CreateUserDto, NewUser};
use clap::{Parser, Subcommand};
use dialoguer::{Input, MultiSelect, Select};
use dotenvy::dotenv;
use std::fmt::Display;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "campusgate-cli")]
#[command(about = "Campusgate CLI - Administrative tools for Campusgate", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a user, prompting for anything not given
    AddUser {
        /// Full name
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// CMS ID (at least six characters)
        #[arg(short = 'c', long)]
        cms_id: Option<String>,

        /// Department, e.g. Seecs
        #[arg(short = 'd', long)]
        department: Option<String>,

        /// Role, e.g. Student or "Lab Instructors"
        #[arg(short = 'r', long)]
        role: Option<String>,

        /// Access entries; chosen from the candidate pool if omitted
        #[arg(short = 'a', long, value_delimiter = ',')]
        access: Option<Vec<String>>,
    },
    /// Seed the database with fake users and access logs
    Seed {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "50")]
        users: usize,

        /// Number of access logs per user
        #[arg(short = 'l', long, default_value = "10")]
        logs: usize,

        /// Spread log timestamps over this many past days
        #[arg(long, default_value = "30")]
        days: i64,

        /// Maximum access entries per user
        #[arg(long, default_value = "8")]
        max_access: usize,
    },
    /// Seed only users
    SeedUsers {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "50")]
        users: usize,

        /// Maximum access entries per user
        #[arg(long, default_value = "8")]
        max_access: usize,
    },
    /// Seed access logs for existing users
    SeedLogs {
        /// Number of access logs per user
        #[arg(short = 'l', long, default_value = "10")]
        logs: usize,

        /// Spread log timestamps over this many past days
        #[arg(long, default_value = "30")]
        days: i64,
    },
    /// Clear seeded users and their access logs
    ClearSeed,
    /// Apply pending database migrations
    Migrate,
}

fn fail(context: &str, error: impl Display) -> ! {
    eprintln!("\n❌ {}: {}", context, error);
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let config = DatabaseConfig::from_env().unwrap_or_else(|e| fail("Configuration error", e));
    let pool = init_db_pool(&config)
        .await
        .unwrap_or_else(|e| fail("Database error", format!("{:#}", e)));

    match cli.command {
        Commands::AddUser {
            full_name,
            email,
            cms_id,
            department,
            role,
            access,
        } => handle_add_user(&pool, full_name, email, cms_id, department, role, access).await,
        Commands::Seed {
            users,
            logs,
            days,
            max_access,
        } => handle_seed(&pool, users, logs, days, max_access).await,
        Commands::SeedUsers { users, max_access } => {
            handle_seed_users(&pool, users, max_access).await
        }
        Commands::SeedLogs { logs, days } => handle_seed_logs(&pool, logs, days).await,
        Commands::ClearSeed => handle_clear_seed(&pool).await,
        Commands::Migrate => handle_migrate(&pool).await,
    }
}

fn prompt_text(prompt: &str, value: Option<String>) -> String {
    value.unwrap_or_else(|| {
        Input::new()
            .with_prompt(prompt)
            .interact_text()
            .unwrap_or_else(|e| fail("Failed to read input", e))
    })
}

fn prompt_choice(prompt: &str, value: Option<String>, choices: &[&'static str]) -> String {
    value.unwrap_or_else(|| {
        let index = Select::new()
            .with_prompt(prompt)
            .items(choices)
            .default(0)
            .interact()
            .unwrap_or_else(|e| fail("Failed to read input", e));
        choices[index].to_string()
    })
}

/// Offers the candidate pool for the chosen department and role. An
/// unrecognized department or role yields an empty list; validation
/// reports it afterwards.
fn prompt_access(
    catalog: &Catalog,
    department: &str,
    role: &str,
    access: Option<Vec<String>>,
) -> Vec<String> {
    if let Some(access) = access {
        return access;
    }

    let (Ok(department), Ok(role)) = (department.parse::<Department>(), role.parse::<Role>())
    else {
        return Vec::new();
    };

    let options = AccessOptions::generate(catalog);
    let pool = filter_options(department, role, &options, catalog);

    let picked = MultiSelect::new()
        .with_prompt("Access (space to toggle, enter to confirm)")
        .items(&pool[..])
        .interact()
        .unwrap_or_else(|e| fail("Failed to read input", e));

    picked.into_iter().map(|i| pool[i].clone()).collect()
}

async fn handle_add_user(
    pool: &PgPool,
    full_name: Option<String>,
    email: Option<String>,
    cms_id: Option<String>,
    department: Option<String>,
    role: Option<String>,
    access: Option<Vec<String>>,
) {
    let catalog = Catalog::default();

    let department_names: Vec<&'static str> =
        catalog.departments().iter().map(|d| d.as_str()).collect();
    let role_names: Vec<&'static str> = catalog.roles().iter().map(|r| r.as_str()).collect();

    let full_name = prompt_text("Full name", full_name);
    let email = prompt_text("Email address", email);
    let cms_id = prompt_text("CMS ID", cms_id);
    let department = prompt_choice("Department", department, &department_names);
    let role = prompt_choice("Role", role, &role_names);
    let access = prompt_access(&catalog, &department, &role, access);

    let dto = CreateUserDto {
        full_name,
        email,
        cms_id,
        department,
        role,
        access,
        password: None,
    };

    let checked = dto
        .validate_form()
        .and_then(|()| dto.validate_with_catalog(&catalog));
    let new_user = match checked {
        Ok(new_user) => new_user,
        Err(errors) => {
            eprintln!("\n❌ Invalid user:");
            for error in field_errors(&errors) {
                eprintln!("   - {}: {}", error.field, error.message);
            }
            std::process::exit(1);
        }
    };

    match create_user_internal(pool, &new_user).await {
        Ok(id) => {
            println!("\n✅ User created successfully!");
            println!("   ID: {}", id);
            println!("   Name: {}", new_user.full_name);
            println!("   CMS ID: {}", new_user.cms_id);
            println!(
                "   {} / {} with {} access entries",
                new_user.department,
                new_user.role,
                new_user.access.len()
            );
        }
        Err(e) => fail("Error creating user", e),
    }
}

async fn create_user_internal(
    pool: &PgPool,
    user: &NewUser,
) -> Result<Uuid, Box<dyn std::error::Error>> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM users WHERE cms_id = $1 AND email = $2)",
    )
    .bind(&user.cms_id)
    .bind(&user.email)
    .fetch_one(pool)
    .await?;

    if exists {
        return Err("A user with this CMS ID and email already exists".into());
    }

    let id: Uuid = sqlx::query_scalar(
        r#"INSERT INTO users (full_name, email, cms_id, department, role, access)
           VALUES ($1, $2, $3, $4, $5, $6)
           RETURNING id"#,
    )
    .bind(&user.full_name)
    .bind(&user.email)
    .bind(&user.cms_id)
    .bind(user.department.as_str())
    .bind(user.role.as_str())
    .bind(&user.access)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

async fn handle_seed(pool: &PgPool, users: usize, logs: usize, days: i64, max_access: usize) {
    let config = SeedConfig::new(users)
        .with_logs_per_user(logs)
        .with_days_back(days)
        .with_max_access(max_access);

    if let Err(e) = seeder::seed_all(pool, config).await {
        fail("Error seeding database", e);
    }
}

async fn handle_seed_users(pool: &PgPool, users: usize, max_access: usize) {
    match seeder::seed_users_only(pool, users, max_access.max(1)).await {
        Ok(created) => println!("✅ Created {} users", created),
        Err(e) => fail("Error seeding users", e),
    }
}

async fn handle_seed_logs(pool: &PgPool, logs: usize, days: i64) {
    match seeder::seed_logs_only(pool, logs, days).await {
        Ok(created) => println!("✅ Created {} access logs", created),
        Err(e) => fail("Error seeding access logs", e),
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        fail("Error clearing seed data", e);
    }
}

async fn handle_migrate(pool: &PgPool) {
    match run_migrations(pool).await {
        Ok(()) => println!("✅ Migrations applied"),
        Err(e) => fail("Error running migrations", format!("{:#}", e)),
    }
}
