//! # Command-Line Interface
//!
//! ```text
//! jewel [--config FILE] [--db FILE] <COMMAND>
//!
//!   init                                  create database + default config
//!   create --name --phone --product       record a sale
//!          --weight --rate --making
//!   list [--json]                         all sales, newest first
//!   invoice <SALE_ID> [--out DIR]         print or save an invoice
//!   status                                store health and settings
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use jewel_core::SaleForm;

#[derive(Debug, Parser)]
#[command(name = "jewel", version)]
#[command(about = "Jewel Billing - gold jewelry sales and GST invoices", long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/jewel-billing/billing.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database file; overrides the config file and JEWEL_DB_PATH
    #[arg(long, global = true, value_name = "FILE")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the database and write a default config file if none exists
    Init,

    /// Record a sale from the billing form fields
    Create(CreateArgs),

    /// List all sales, newest first
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the invoice for a sale, or save it to a directory
    Invoice {
        #[arg(value_name = "SALE_ID")]
        id: i64,

        /// Directory to write invoice_<id>.pdf into
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Show database health and the configuration in effect
    Status,
}

/// Billing form fields. Values are passed through as typed; validation
/// happens when the sale is created.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Customer name
    #[arg(long)]
    pub name: String,

    /// Customer phone
    #[arg(long)]
    pub phone: String,

    /// Product description, e.g. "Ring"
    #[arg(long)]
    pub product: String,

    /// Gold weight in grams
    #[arg(long, allow_hyphen_values = true)]
    pub weight: String,

    /// Gold rate per gram
    #[arg(long, allow_hyphen_values = true)]
    pub rate: String,

    /// Making charges
    #[arg(long, allow_hyphen_values = true)]
    pub making: String,
}

impl From<CreateArgs> for SaleForm {
    fn from(args: CreateArgs) -> Self {
        SaleForm {
            customer_name: args.name,
            customer_phone: args.phone,
            product_details: args.product,
            gold_weight: args.weight,
            gold_rate: args.rate,
            making_charges: args.making,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "jewel", "create", "--name", "Asha", "--phone", "9999999999", "--product", "Ring",
            "--weight", "10", "--rate", "6000", "--making", "500",
        ])
        .unwrap();

        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        let form = SaleForm::from(args);
        assert_eq!(form.customer_name, "Asha");
        assert_eq!(form.gold_weight, "10");
        assert_eq!(form.making_charges, "500");
    }

    #[test]
    fn test_create_requires_all_fields() {
        let result = Cli::try_parse_from(["jewel", "create", "--name", "Asha"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["jewel", "invoice", "7", "--out", "/tmp/inv", "--db", "x.db"])
            .unwrap();

        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
        assert!(matches!(
            cli.command,
            Commands::Invoice { id: 7, out: Some(_) }
        ));
    }

    #[test]
    fn test_list_json_flag() {
        let cli = Cli::try_parse_from(["jewel", "list", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::List { json: true }));
    }

    #[test]
    fn test_negative_amount_reaches_validation() {
        let cli = Cli::try_parse_from([
            "jewel", "create", "--name", "Asha", "--phone", "1", "--product", "Ring",
            "--weight", "10", "--rate", "6000", "--making", "-1",
        ])
        .unwrap();
        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(args.making, "-1");
    }

    #[test]
    fn test_invoice_id_must_be_integer() {
        assert!(Cli::try_parse_from(["jewel", "invoice", "seven"]).is_err());
    }
}
