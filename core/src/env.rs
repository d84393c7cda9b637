use std::{env::var, sync::OnceLock};


static ENV: OnceLock<Env> = OnceLock::new();

#[derive(Debug)]
pub struct Env {
    pub mongo_url:      String,
    pub mongo_database: String,
    pub host:           String,
    pub port:           u16,
    pub dev:            bool
}

fn parse_dev(value: Option<String>) -> bool {
    match value {
        Some(value) => !(value == "false" || value == "0"),
        None => cfg!(debug_assertions)
    }
}

impl Default for Env {
    fn default() -> Self {
        Self {
            mongo_url:      var("MONGO_URL").expect("MONGO_URL is not set"),
            mongo_database: var("MONGO_DATABASE")
                .unwrap_or("pollbuddy".to_string()),
            host:           var("HOST").unwrap_or("0.0.0.0".to_string()),
            port:           var("PORT")
                .unwrap_or("3001".to_string())
                .parse()
                .expect("PORT is not a valid port number"),
            dev:            parse_dev(var("DEV").ok())
        }
    }
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn env() -> &'static Env {
    ENV.get_or_init(Env::new)
}
