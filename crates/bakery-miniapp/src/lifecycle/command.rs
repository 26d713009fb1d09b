//! Line commands for driving the app from a terminal.
use crate::model::{CategoryId, DeliveryMethod, OrderPatch, Packaging, ProductId};
use crate::router::Route;
use crate::screens::UiAction;
use chrono::NaiveDate;
use thiserror::Error;

pub const HELP: &str = "\
Navigation:  /path | open <path> | back | home | shop
Catalog:     category <id> | product <id> | search <text> | clear
Product:     next | prev | order
Order form:  name <text> | contact <text> | date YYYY-MM-DD
             packaging standard|gift|eco|none | delivery pickup|delivery
             comment <text> | submit | cancel
Messages:    message <text> | submit | another
Other:       help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(Route),
    Back,
    Do(Vec<UiAction>),
    Quit,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("Invalid value for `{command}`: {value}")]
    InvalidValue { command: &'static str, value: String },
}

impl Command {
    /// Parses one input line. Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        if line.starts_with('/') {
            return Ok(Some(Command::Open(Route::parse(line))));
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let one = |action: UiAction| -> Result<Option<Command>, CommandError> {
            Ok(Some(Command::Do(vec![action])))
        };
        let edit = |patch: OrderPatch| one(UiAction::EditOrder(patch));

        match word {
            "open" => Ok(Some(Command::Open(Route::parse(required("open", rest)?)))),
            "back" => Ok(Some(Command::Back)),
            "quit" | "exit" => Ok(Some(Command::Quit)),
            "home" => one(UiAction::GoHome),
            "shop" => one(UiAction::ContinueShopping),
            "category" => one(UiAction::OpenCategory(CategoryId::from(required(
                "category", rest,
            )?))),
            "product" => one(UiAction::OpenProduct(ProductId::from(required(
                "product", rest,
            )?))),
            "search" => Ok(Some(Command::Do(vec![
                UiAction::EditSearch(rest.to_string()),
                UiAction::SubmitSearch,
            ]))),
            "clear" => one(UiAction::ClearSearch),
            "next" => one(UiAction::NextImage),
            "prev" => one(UiAction::PreviousImage),
            "order" => one(UiAction::StartOrder),
            "name" => edit(OrderPatch {
                customer_name: Some(rest.to_string()),
                ..OrderPatch::default()
            }),
            "contact" => edit(OrderPatch {
                customer_contact: Some(rest.to_string()),
                ..OrderPatch::default()
            }),
            "date" => {
                let value = required("date", rest)?;
                let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                    CommandError::InvalidValue {
                        command: "date",
                        value: value.to_string(),
                    }
                })?;
                edit(OrderPatch {
                    delivery_date: Some(date),
                    ..OrderPatch::default()
                })
            }
            "packaging" => edit(OrderPatch {
                packaging: Some(parse_packaging(required("packaging", rest)?)?),
                ..OrderPatch::default()
            }),
            "delivery" => edit(OrderPatch {
                delivery_method: Some(parse_delivery(required("delivery", rest)?)?),
                ..OrderPatch::default()
            }),
            "comment" => edit(OrderPatch {
                additional_comment: Some(rest.to_string()),
                ..OrderPatch::default()
            }),
            "message" => one(UiAction::EditMessage(rest.to_string())),
            "submit" => one(UiAction::Submit),
            "cancel" => one(UiAction::Cancel),
            "another" => one(UiAction::SendAnother),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn required<'a>(command: &'static str, rest: &'a str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

fn parse_packaging(value: &str) -> Result<Packaging, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "standard" => Ok(Packaging::Standard),
        "gift" => Ok(Packaging::Gift),
        "eco" => Ok(Packaging::Eco),
        "none" => Ok(Packaging::Bare),
        _ => Err(CommandError::InvalidValue {
            command: "packaging",
            value: value.to_string(),
        }),
    }
}

fn parse_delivery(value: &str) -> Result<DeliveryMethod, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "pickup" => Ok(DeliveryMethod::Pickup),
        "delivery" => Ok(DeliveryMethod::Delivery),
        _ => Err(CommandError::InvalidValue {
            command: "delivery",
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_open_routes() {
        assert_eq!(
            Command::parse("/catalog/c1").unwrap(),
            Some(Command::Open(Route::Category(CategoryId::from("c1"))))
        );
        assert_eq!(
            Command::parse("open /admin/broadcast").unwrap(),
            Some(Command::Open(Route::Broadcast))
        );
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_search_edits_then_submits() {
        assert_eq!(
            Command::parse("search honey cake").unwrap(),
            Some(Command::Do(vec![
                UiAction::EditSearch("honey cake".into()),
                UiAction::SubmitSearch,
            ]))
        );
    }

    #[test]
    fn test_order_fields() {
        let Some(Command::Do(actions)) = Command::parse("date 2026-12-31").unwrap() else {
            panic!("expected an action");
        };
        let UiAction::EditOrder(patch) = &actions[0] else {
            panic!("expected an order edit");
        };
        assert_eq!(patch.delivery_date, NaiveDate::from_ymd_opt(2026, 12, 31));
        assert_eq!(patch.customer_name, None);

        let Some(Command::Do(actions)) = Command::parse("packaging none").unwrap() else {
            panic!("expected an action");
        };
        assert_eq!(
            actions,
            vec![UiAction::EditOrder(OrderPatch {
                packaging: Some(Packaging::Bare),
                ..OrderPatch::default()
            })]
        );
    }

    #[test]
    fn test_bad_input() {
        assert_eq!(
            Command::parse("date tomorrow"),
            Err(CommandError::InvalidValue {
                command: "date",
                value: "tomorrow".into()
            })
        );
        assert_eq!(
            Command::parse("product"),
            Err(CommandError::MissingArgument("product"))
        );
        assert_eq!(
            Command::parse("dance"),
            Err(CommandError::Unknown("dance".into()))
        );
    }
}
