use anyhow::Result;
use std::env;
use strum::EnumString;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub store: StoreBackend,
    pub mail: Option<MailConfig>,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let store = match env::var("STORE_BACKEND") {
            Ok(v) => v.parse::<StoreBackend>()?,
            Err(_) => StoreBackend::default(),
        };
        let database = DatabaseConfig {
            host: env::var("DATABASE_HOST").unwrap_or_else(|_| "localhost".into()),
            port: env::var("DATABASE_PORT")
                .unwrap_or_else(|_| "5432".into())
                .parse::<u16>()?,
            username: env::var("DATABASE_USERNAME").unwrap_or_else(|_| "app".into()),
            password: env::var("DATABASE_PASSWORD").unwrap_or_default(),
            database: env::var("DATABASE_NAME").unwrap_or_else(|_| "app".into()),
        };
        // アクセストークンがない場合はメール送信を行わずログ出力のみとする
        let mail = match env::var("MAIL_ACCESS_TOKEN") {
            Ok(access_token) => Some(MailConfig {
                endpoint: env::var("MAIL_API_ENDPOINT").unwrap_or_else(|_| {
                    "https://gmail.googleapis.com/gmail/v1/users/me/messages/send".into()
                }),
                access_token,
                sender: env::var("MAIL_SENDER").ok(),
            }),
            Err(_) => None,
        };
        let server = ServerConfig {
            port: env::var("APP_PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse::<u16>()?,
        };
        Ok(Self {
            database,
            store,
            mail,
            server,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Clone)]
pub struct MailConfig {
    pub endpoint: String,
    pub access_token: String,
    pub sender: Option<String>,
}

pub struct ServerConfig {
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_parses_lowercase_names() {
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!("postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert!("mongo".parse::<StoreBackend>().is_err());
    }
}
