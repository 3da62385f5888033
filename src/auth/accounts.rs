use rand::Rng;

use super::password::{hash_password, verify_password};

/// Checks operator credentials. Returns the canonical account name on success.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, name: &str, password: &str) -> Option<String>;
}

#[derive(Debug, Clone)]
struct Account {
    name: String,
    password_hash: String,
}

/// Accounts from `ADMIN_ACCOUNTS`: `name:argon2-hash` entries separated by `;`.
#[derive(Debug, Clone)]
pub struct ConfiguredAccounts {
    accounts: Vec<Account>,
}

pub const BOOTSTRAP_ACCOUNT: &str = "Admin";

impl ConfiguredAccounts {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut accounts = Vec::new();
        for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, hash) = entry
                .split_once(':')
                .ok_or_else(|| format!("account entry without ':' separator: {entry}"))?;
            let name = name.trim();
            let hash = hash.trim();
            if name.is_empty() || hash.is_empty() {
                return Err(format!("account entry with empty name or hash: {entry}"));
            }
            if !hash.starts_with("$argon2") {
                return Err(format!("account {name} does not carry an argon2 hash"));
            }
            accounts.push(Account {
                name: name.to_string(),
                password_hash: hash.to_string(),
            });
        }
        if accounts.is_empty() {
            return Err("no accounts configured".to_string());
        }
        Ok(Self { accounts })
    }

    /// A single account with a known plaintext password.
    pub fn single(name: &str, password: &str) -> Result<Self, String> {
        Ok(Self {
            accounts: vec![Account {
                name: name.to_string(),
                password_hash: hash_password(password)?,
            }],
        })
    }

    /// `Admin` with a random one-time password, logged once at warn.
    pub fn bootstrap() -> Result<Self, String> {
        let bytes: [u8; 9] = rand::rng().random();
        let password = hex::encode(bytes);
        log::warn!(
            "ADMIN_ACCOUNTS not set; sign in as {BOOTSTRAP_ACCOUNT} with one-time password {password}"
        );
        Self::single(BOOTSTRAP_ACCOUNT, &password)
    }

    /// Parse `raw` when present, otherwise fall back to the bootstrap account.
    pub fn from_config(raw: Option<&str>) -> Result<Self, String> {
        match raw {
            Some(raw) => Self::parse(raw),
            None => Self::bootstrap(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.accounts.iter().map(|a| a.name.as_str()).collect()
    }
}

impl Authenticator for ConfiguredAccounts {
    fn authenticate(&self, name: &str, password: &str) -> Option<String> {
        let wanted = name.trim();
        let account = self
            .accounts
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(wanted))?;
        match verify_password(password, &account.password_hash) {
            Ok(true) => Some(account.name.clone()),
            Ok(false) => None,
            Err(e) => {
                log::error!("Stored hash for {} is unreadable: {e}", account.name);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_account_accepts_its_password_case_insensitively() {
        let accounts = ConfiguredAccounts::single("Pastor", "s3cret-pass").unwrap();
        assert_eq!(accounts.authenticate("  pastor ", "s3cret-pass"), Some("Pastor".to_string()));
        assert_eq!(accounts.authenticate("Pastor", "wrong"), None);
        assert_eq!(accounts.authenticate("Deacon", "s3cret-pass"), None);
    }

    #[test]
    fn parse_reads_several_entries() {
        let a = hash_password("one").unwrap();
        let b = hash_password("two").unwrap();
        let accounts = ConfiguredAccounts::parse(&format!("Admin:{a}; Pastor:{b};")).unwrap();
        assert_eq!(accounts.names(), vec!["Admin", "Pastor"]);
        assert_eq!(accounts.authenticate("pastor", "two"), Some("Pastor".to_string()));
        assert_eq!(accounts.authenticate("admin", "two"), None);
    }

    #[test]
    fn parse_rejects_malformed_entries() {
        assert!(ConfiguredAccounts::parse("").is_err());
        assert!(ConfiguredAccounts::parse("Admin").is_err());
        assert!(ConfiguredAccounts::parse("Admin:plaintext").is_err());
        assert!(ConfiguredAccounts::parse(":$argon2id$x").is_err());
    }

    #[test]
    fn bootstrap_creates_the_admin_account() {
        let accounts = ConfiguredAccounts::from_config(None).unwrap();
        assert_eq!(accounts.names(), vec![BOOTSTRAP_ACCOUNT]);
        assert_eq!(accounts.authenticate("Admin", ""), None);
    }
}
