use anyhow::Result;
use clap::Subcommand;

use crate::db::Database;
use crate::ledger;
use crate::models::CategoryRule;
use crate::ui::{render, theme};

#[derive(Subcommand, Debug)]
pub(crate) enum CategoriesCommand {
    /// List all categories
    List,

    /// Add a category
    Add {
        name: String,

        /// Display color, e.g. red or #ff0000
        #[arg(long, short, default_value = "white")]
        color: String,
    },

    /// Delete a category; its rules go with it
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Manage auto-categorization rules
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum RulesCommand {
    /// List all rules with their category
    List,

    /// Add a rule matching receiver or description
    Add {
        /// Keyword, matched case-insensitively
        pattern: String,

        /// Category to assign
        #[arg(long, short)]
        category_id: i64,

        /// Treat the pattern as a regular expression
        #[arg(long)]
        regex: bool,
    },

    /// Delete a rule
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

pub(super) fn execute(command: CategoriesCommand, db: &Database) -> Result<()> {
    match command {
        CategoriesCommand::List => {
            let categories = db.get_categories()?;
            if categories.is_empty() {
                println!("{}", theme::warning("No categories found."));
                return Ok(());
            }
            println!("{}", render::category_list(&categories));
        }

        CategoriesCommand::Add { name, color } => {
            let category = ledger::add_category(db, &name, &color)?;
            println!(
                "{}",
                theme::success(&format!(
                    "Added category {} ({})",
                    category.name, category.color
                ))
            );
        }

        CategoriesCommand::Delete { id, force } => {
            if !force && !super::confirm(&format!("Delete category #{id}?"))? {
                return Ok(());
            }
            if !db.delete_category(id)? {
                anyhow::bail!("Category #{id} not found.");
            }
            println!("{}", theme::success(&format!("Deleted category #{id}")));
        }

        CategoriesCommand::Rules { command } => rules(command, db)?,
    }
    Ok(())
}

fn rules(command: RulesCommand, db: &Database) -> Result<()> {
    match command {
        RulesCommand::List => {
            let rules = db.get_category_rules_named()?;
            if rules.is_empty() {
                println!("{}", theme::warning("No rules found."));
                return Ok(());
            }
            println!("{}", render::rule_list(&rules));
        }

        RulesCommand::Add {
            pattern,
            category_id,
            regex: is_regex,
        } => {
            let rule = if is_regex {
                regex::Regex::new(&pattern)
                    .map_err(|e| anyhow::anyhow!("Invalid regex '{pattern}': {e}"))?;
                CategoryRule::new_regex(pattern, category_id)
            } else {
                CategoryRule::new_keyword(&pattern, category_id)
            };
            if rule.pattern.is_empty() {
                anyhow::bail!("Rule pattern cannot be empty");
            }
            db.insert_category_rule(&rule)?;
            println!(
                "{}",
                theme::success(&format!(
                    "Added rule: '{}' -> Category #{}",
                    rule.pattern, rule.category_id
                ))
            );
        }

        RulesCommand::Delete { id, force } => {
            if !force && !super::confirm(&format!("Delete rule #{id}?"))? {
                return Ok(());
            }
            if !db.delete_category_rule(id)? {
                anyhow::bail!("Rule #{id} not found.");
            }
            println!("{}", theme::success(&format!("Deleted rule #{id}")));
        }
    }
    Ok(())
}
