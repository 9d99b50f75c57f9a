use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection, EntityTrait, QueryOrder, Set};

type CliResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

mod users {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub username: String,
        pub password: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Parser, Debug)]
#[command(name = "cashbook_admin")]
#[command(about = "Admin utilities for the cash book (bootstrap users)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./cashbook.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Register a user; the password is read from the terminal.
    Create(UserCreateArgs),
    /// Print every registered username.
    List,
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
}

/// Read a line from the terminal without echoing it.
fn read_hidden(prompt: &str) -> CliResult<String> {
    let mut err = std::io::stderr();
    execute!(err, Print(prompt))?;
    terminal::enable_raw_mode()?;
    let line = read_hidden_line();
    terminal::disable_raw_mode()?;
    execute!(err, Print("\r\n"))?;
    err.flush()?;
    line
}

fn read_hidden_line() -> CliResult<String> {
    let mut line = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };
        match code {
            KeyCode::Enter => return Ok(line),
            KeyCode::Backspace => {
                line.pop();
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) => line.push(ch),
            _ => {}
        }
    }
}

fn confirm_password(password: String, confirmation: &str) -> Result<String, &'static str> {
    if password.is_empty() {
        return Err("password must not be empty");
    }
    if password != confirmation {
        return Err("passwords do not match");
    }
    Ok(password)
}

async fn connect_db(database_url: &str) -> CliResult<DatabaseConnection> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

async fn create_user(db: &DatabaseConnection, username: &str, password: String) -> CliResult<()> {
    if users::Entity::find_by_id(username).one(db).await?.is_some() {
        return Err(format!("user already exists: {username}").into());
    }
    let user = users::ActiveModel {
        username: Set(username.to_string()),
        password: Set(password),
    };
    users::Entity::insert(user).exec(db).await?;
    Ok(())
}

async fn usernames(db: &DatabaseConnection) -> CliResult<Vec<String>> {
    let users = users::Entity::find()
        .order_by_asc(users::Column::Username)
        .all(db)
        .await?;
    Ok(users.into_iter().map(|u| u.username).collect())
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let db = connect_db(&cli.database_url).await?;

    match cli.command {
        Command::User(UserCommand::Create(args)) => {
            let username = args.username.trim();
            if username.is_empty() {
                return Err("username must not be empty".into());
            }
            let password = read_hidden("Password: ")?;
            let confirmation = read_hidden("Confirm password: ")?;
            let password = confirm_password(password, &confirmation)?;

            create_user(&db, username, password).await?;
            println!("created user: {username}");
        }
        Command::User(UserCommand::List) => {
            for username in usernames(&db).await? {
                println!("{username}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_must_be_confirmed() {
        assert_eq!(confirm_password("s3cret".to_string(), "s3cret"), Ok("s3cret".to_string()));
        assert!(confirm_password("s3cret".to_string(), "secret").is_err());
        assert!(confirm_password(String::new(), "").is_err());
    }

    #[tokio::test]
    async fn users_are_created_once_and_listed_sorted() {
        let db = connect_db("sqlite::memory:").await.unwrap();
        create_user(&db, "bob", "pw".to_string()).await.unwrap();
        create_user(&db, "alice", "pw".to_string()).await.unwrap();
        assert!(create_user(&db, "bob", "other".to_string()).await.is_err());

        assert_eq!(usernames(&db).await.unwrap(), ["alice", "bob"]);
    }
}
