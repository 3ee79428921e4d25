use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use migration::MigratorTrait;
use sea_orm::{ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

mod companies {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "companies")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

mod users {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
        pub email: String,
        pub password: String,
        pub role: String,
        pub company_id: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Parser, Debug)]
#[command(name = "bottega_admin")]
#[command(about = "Admin utilities for Bottega (bootstrap companies/users, mint dev tokens)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./bottega.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Company(Company),
    User(User),
    /// Mint a development bearer token for an existing user.
    Token(TokenArgs),
}

#[derive(Args, Debug)]
struct Company {
    #[command(subcommand)]
    command: CompanyCommand,
}

#[derive(Subcommand, Debug)]
enum CompanyCommand {
    Create(CompanyCreateArgs),
}

#[derive(Args, Debug)]
struct CompanyCreateArgs {
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    company_id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "member")]
    role: String,
}

#[derive(Args, Debug)]
struct TokenArgs {
    #[arg(long)]
    email: String,
    /// Signing secret; must match the server's `jwt_secret`.
    #[arg(long, env = "JWT_SECRET")]
    jwt_secret: String,
    #[arg(long, default_value_t = 1440)]
    ttl_minutes: i64,
}

#[derive(serde::Serialize)]
struct Claims {
    sub: String,
    name: String,
    email: String,
    role: String,
    company_id: String,
    exp: i64,
    iat: i64,
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn prompt_password(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;

    let mut buf = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                break;
            }
            KeyCode::Backspace => {
                if buf.pop().is_some() {
                    execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                    out.flush()?;
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                buf.push(ch);
                execute!(out, Print("*"))?;
                out.flush()?;
            }
            _ => {}
        }
    }

    Ok(buf)
}

fn prompt_password_twice() -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    for _ in 0..3 {
        let p1 = prompt_password("Password: ")?;
        if p1.is_empty() {
            execute!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                Print("Password must not be empty.\r\n")
            )?;
            continue;
        }

        let p2 = prompt_password("Confirm password: ")?;
        if p1 == p2 {
            return Ok(p1);
        }

        execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print("Passwords do not match. Try again.\r\n")
        )?;
    }

    Err("too many attempts".into())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;

    match cli.command {
        Command::Company(Company {
            command: CompanyCommand::Create(args),
        }) => {
            let company = companies::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                name: Set(args.name.clone()),
            };
            let inserted = companies::Entity::insert(company).exec(&db).await?;
            println!(
                "created company: {} ({})",
                args.name, inserted.last_insert_id
            );
        }
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            if companies::Entity::find_by_id(args.company_id.clone())
                .one(&db)
                .await?
                .is_none()
            {
                eprintln!("company not found: {}", args.company_id);
                std::process::exit(1);
            }

            let password = prompt_password_twice()?;

            let engine = engine::Engine::builder().database(db.clone()).build().await?;
            let user = engine
                .create_user(
                    &args.company_id,
                    engine::UserDraft {
                        name: args.name,
                        email: args.email.clone(),
                        password: Some(password),
                        role: args.role,
                    },
                )
                .await?;
            println!("created user: {} ({})", args.email, user.id);
        }
        Command::Token(args) => {
            let Some(user) = users::Entity::find()
                .filter(users::Column::Email.eq(args.email.clone()))
                .one(&db)
                .await?
            else {
                eprintln!("user not found: {}", args.email);
                std::process::exit(1);
            };

            let now = chrono::Utc::now();
            let claims = Claims {
                sub: user.id,
                name: user.name,
                email: user.email,
                role: user.role,
                company_id: user.company_id,
                exp: (now + chrono::Duration::minutes(args.ttl_minutes)).timestamp(),
                iat: now.timestamp(),
            };
            let token = jsonwebtoken::encode(
                &jsonwebtoken::Header::default(),
                &claims,
                &jsonwebtoken::EncodingKey::from_secret(args.jwt_secret.as_bytes()),
            )?;
            println!("{token}");
        }
    }

    Ok(())
}
