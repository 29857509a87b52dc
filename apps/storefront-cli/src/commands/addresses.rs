//! Address book.

use clap::{Args, Subcommand};

use storefront_client::Store;
use storefront_core::types::AddressInput;
use storefront_core::validation::validate_address;

use super::{failed, invalid, settle, signed_in};
use crate::views::notify::Notice;
use crate::views::orders::render_addresses;

#[derive(Debug, Args)]
pub struct AddressArgs {
    /// Label such as "Home".
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub street: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub postal_code: String,
    #[arg(long)]
    pub country: String,
    #[arg(long)]
    pub phone: String,
    /// Make this the default shipping address.
    #[arg(long)]
    pub default: bool,
}

impl From<AddressArgs> for AddressInput {
    fn from(args: AddressArgs) -> Self {
        AddressInput {
            name: args.name,
            street: args.street,
            city: args.city,
            state: args.state,
            postal_code: args.postal_code,
            country: args.country,
            phone: args.phone,
            is_default: args.default,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum AddressCommand {
    List,
    Add(AddressArgs),
    Update {
        id: u64,
        #[command(flatten)]
        fields: AddressArgs,
    },
    Remove {
        id: u64,
    },
}

pub async fn run(store: &Store, command: AddressCommand) -> anyhow::Result<()> {
    if !signed_in(store) {
        return Ok(());
    }

    match command {
        AddressCommand::List => {
            settle(store.fetch_addresses().await);
        }
        AddressCommand::Add(args) => {
            let input = AddressInput::from(args);
            validate_address(&input).map_err(invalid)?;
            store.create_address(input).await.map_err(failed)?;
            Notice::success("Address saved").emit();
        }
        AddressCommand::Update { id, fields } => {
            let input = AddressInput::from(fields);
            validate_address(&input).map_err(invalid)?;
            store.update_address(id, input).await.map_err(failed)?;
            Notice::success("Address updated").emit();
        }
        AddressCommand::Remove { id } => {
            store.delete_address(id).await.map_err(failed)?;
            Notice::success("Address removed").emit();
        }
    }

    print!("{}", render_addresses(&store.state().orders.addresses));
    Ok(())
}
