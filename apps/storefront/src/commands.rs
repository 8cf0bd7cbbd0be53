use std::str::FromStr;

use catalog::MenuFilter;
use shared::domain::ItemId;
use thiserror::Error;

/// One line of user input, parsed. Item ids are not resolved here; the
/// cart engine decides what an unknown id means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Render the menu; with an argument, select that filter first.
    Menu(Option<MenuFilter>),
    View(ItemId),
    Add { id: ItemId, quantity: u32 },
    Remove { id: ItemId, quantity: u32 },
    Cart,
    Checkout,
    Help,
    Quit,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'; type 'help' for the list")]
    Unknown(String),
    #[error("'{0}' needs a menu item id")]
    MissingItemId(&'static str),
    #[error("invalid quantity '{0}'")]
    InvalidQuantity(String),
    #[error("unknown menu filter '{0}'; use 'all' or a category name")]
    InvalidFilter(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.split_whitespace();
        let Some(keyword) = parts.next() else {
            return Err(CommandError::Unknown(String::new()));
        };

        match keyword {
            "menu" => match parts.next() {
                None => Ok(Command::Menu(None)),
                Some(filter) => filter
                    .parse::<MenuFilter>()
                    .map(|filter| Command::Menu(Some(filter)))
                    .map_err(|_| CommandError::InvalidFilter(filter.to_string())),
            },
            "view" => parts
                .next()
                .map(|id| Command::View(ItemId::from(id)))
                .ok_or(CommandError::MissingItemId("view")),
            "add" => {
                let (id, quantity) = parse_item_and_quantity(parts.next(), parts.next(), "add")?;
                Ok(Command::Add { id, quantity })
            }
            "rm" | "remove" => {
                let (id, quantity) = parse_item_and_quantity(parts.next(), parts.next(), "remove")?;
                Ok(Command::Remove { id, quantity })
            }
            "cart" => Ok(Command::Cart),
            "checkout" => Ok(Command::Checkout),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_item_and_quantity(
    id: Option<&str>,
    quantity: Option<&str>,
    keyword: &'static str,
) -> Result<(ItemId, u32), CommandError> {
    let id = ItemId::from(id.ok_or(CommandError::MissingItemId(keyword))?);
    let quantity = match quantity {
        None => 1,
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| CommandError::InvalidQuantity(raw.to_string()))?,
    };
    Ok((id, quantity))
}

#[cfg(test)]
mod tests {
    use shared::domain::Category;

    use super::*;

    #[test]
    fn parses_menu_with_and_without_filter() {
        assert_eq!("menu".parse(), Ok(Command::Menu(None)));
        assert_eq!(
            "menu drinks".parse(),
            Ok(Command::Menu(Some(MenuFilter::Category(Category::Drinks))))
        );
        assert_eq!("menu all".parse(), Ok(Command::Menu(Some(MenuFilter::All))));
        assert_eq!(
            "menu dessert".parse::<Command>(),
            Err(CommandError::InvalidFilter("dessert".to_string()))
        );
    }

    #[test]
    fn parses_cart_adjustments_with_default_quantity() {
        assert_eq!(
            "add c1".parse(),
            Ok(Command::Add {
                id: ItemId::from("c1"),
                quantity: 1,
            })
        );
        assert_eq!(
            "add c1 3".parse(),
            Ok(Command::Add {
                id: ItemId::from("c1"),
                quantity: 3,
            })
        );
        assert_eq!(
            "rm b1 2".parse(),
            Ok(Command::Remove {
                id: ItemId::from("b1"),
                quantity: 2,
            })
        );
        assert_eq!(
            "remove b1".parse(),
            Ok(Command::Remove {
                id: ItemId::from("b1"),
                quantity: 1,
            })
        );
    }

    #[test]
    fn rejects_malformed_adjustments() {
        assert_eq!(
            "add".parse::<Command>(),
            Err(CommandError::MissingItemId("add"))
        );
        assert_eq!(
            "add c1 many".parse::<Command>(),
            Err(CommandError::InvalidQuantity("many".to_string()))
        );
    }

    #[test]
    fn parses_bare_keywords() {
        assert_eq!("cart".parse(), Ok(Command::Cart));
        assert_eq!("checkout".parse(), Ok(Command::Checkout));
        assert_eq!("help".parse(), Ok(Command::Help));
        assert_eq!("quit".parse(), Ok(Command::Quit));
        assert_eq!("exit".parse(), Ok(Command::Quit));
        assert!("order".parse::<Command>().is_err());
    }

    #[test]
    fn parses_view_with_item_id() {
        assert_eq!("view c1".parse(), Ok(Command::View(ItemId::from("c1"))));
        assert_eq!(
            "view".parse::<Command>(),
            Err(CommandError::MissingItemId("view"))
        );
    }
}
