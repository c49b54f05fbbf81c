use crate::domain::request::{IndividualProfilesRequest, LookupTableType};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "ccb-api")]
#[command(about = "Query the Church Community Builder API")]
pub struct CliConfig {
    #[arg(long, short, default_value = "ccb.toml", help = "Path to the TOML config file")]
    pub config: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch one individual profile, or list them.
    Profiles(ProfilesArgs),
    /// List custom field labels.
    CustomFields,
    /// List the entries of a lookup table, e.g. `hobby`.
    Lookup {
        #[arg(value_parser = parse_lookup_table)]
        table: LookupTableType,
    },
    /// List campuses.
    Campuses,
}

#[derive(Clone, Default, clap::Args)]
pub struct ProfilesArgs {
    #[arg(long, default_value_t = 0)]
    pub id: u64,

    #[arg(long)]
    pub login: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    #[arg(long)]
    pub routing_number: Option<String>,

    #[arg(long)]
    pub account_number: Option<String>,

    #[arg(long, help = "Only profiles modified since this date (YYYY-MM-DD)")]
    pub modified_since: Option<NaiveDate>,

    #[arg(long)]
    pub include_inactive: Option<bool>,

    #[arg(long, default_value_t = 0)]
    pub page: u32,

    #[arg(long, default_value_t = 0)]
    pub per_page: u32,
}

impl std::fmt::Debug for ProfilesArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfilesArgs")
            .field("id", &self.id)
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("routing_number", &self.routing_number)
            .field("account_number", &self.account_number.as_ref().map(|_| "***"))
            .field("modified_since", &self.modified_since)
            .field("include_inactive", &self.include_inactive)
            .field("page", &self.page)
            .field("per_page", &self.per_page)
            .finish()
    }
}

impl From<&ProfilesArgs> for IndividualProfilesRequest {
    fn from(args: &ProfilesArgs) -> Self {
        IndividualProfilesRequest {
            id: args.id,
            login: args.login.clone(),
            password: args.password.clone(),
            routing_number: args.routing_number.clone(),
            account_number: args.account_number.clone(),
            modified_since: args.modified_since,
            include_inactive: args.include_inactive,
            page: args.page,
            per_page: args.per_page,
        }
    }
}

fn parse_lookup_table(value: &str) -> Result<LookupTableType, String> {
    LookupTableType::from_identifier(value).ok_or_else(|| {
        let known: Vec<&str> = LookupTableType::ALL.iter().map(|t| t.identifier()).collect();
        format!("unknown lookup table '{}'; expected one of: {}", value, known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profiles_command() {
        let cli = CliConfig::try_parse_from([
            "ccb-api",
            "--config",
            "church.toml",
            "profiles",
            "--modified-since",
            "2015-06-30",
            "--page",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.config, "church.toml");
        let Command::Profiles(args) = &cli.command else {
            panic!("expected profiles command");
        };
        let request = IndividualProfilesRequest::from(args);
        assert_eq!(request.modified_since, NaiveDate::from_ymd_opt(2015, 6, 30));
        assert_eq!(request.page, 2);
        assert_eq!(request.id, 0);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cli = CliConfig::try_parse_from([
            "ccb-api",
            "profiles",
            "--login",
            "bsmith",
            "--password",
            "hunter2",
            "--routing-number",
            "123456789",
            "--account-number",
            "000111222",
        ])
        .unwrap();

        let logged = format!("{:?}", cli);
        assert!(logged.contains("bsmith"));
        assert!(!logged.contains("hunter2"));
        assert!(!logged.contains("000111222"));
    }

    #[test]
    fn test_parse_lookup_command() {
        let cli = CliConfig::try_parse_from(["ccb-api", "lookup", "how_they_heard"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Lookup {
                table: LookupTableType::HowTheyHeard
            }
        ));

        assert!(CliConfig::try_parse_from(["ccb-api", "lookup", "pets"]).is_err());
    }
}
