use super::engine;
use crate::domain::a001_category::{CategoryId, SubcategoryId};
use crate::shared::InventoryState;
use crate::usecases::common::UseCaseResult;
use serde::{Deserialize, Serialize};

/// Структурное изменение таксономии
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaxonomyCommand {
    AddCategory {
        name: String,
    },
    DeleteCategory {
        category_id: CategoryId,
    },
    RenameCategory {
        category_id: CategoryId,
        name: String,
    },
    AddSubcategory {
        category_id: CategoryId,
        name: String,
    },
    DeleteSubcategory {
        category_id: CategoryId,
        subcategory_id: SubcategoryId,
    },
    RenameSubcategory {
        category_id: CategoryId,
        subcategory_id: SubcategoryId,
        name: String,
    },
}

/// Итог успешно применённой команды
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    CategoryAdded(CategoryId),
    CategoryDeleted { reassigned: usize },
    SubcategoryAdded(SubcategoryId),
    SubcategoryDeleted { reassigned: usize },
    Renamed,
}

impl Outcome {
    /// Сколько товаров было переназначено
    pub fn reassigned(&self) -> usize {
        match self {
            Outcome::CategoryDeleted { reassigned } | Outcome::SubcategoryDeleted { reassigned } => {
                *reassigned
            }
            _ => 0,
        }
    }
}

/// Применить команду к состоянию на месте
pub fn apply(state: &mut InventoryState, command: &TaxonomyCommand) -> UseCaseResult<Outcome> {
    match command {
        TaxonomyCommand::AddCategory { name } => {
            engine::add_category(state, name).map(Outcome::CategoryAdded)
        }
        TaxonomyCommand::DeleteCategory { category_id } => {
            engine::delete_category(state, *category_id)
                .map(|reassigned| Outcome::CategoryDeleted { reassigned })
        }
        TaxonomyCommand::RenameCategory { category_id, name } => {
            engine::rename_category(state, *category_id, name).map(|_| Outcome::Renamed)
        }
        TaxonomyCommand::AddSubcategory { category_id, name } => {
            engine::add_subcategory(state, *category_id, name).map(Outcome::SubcategoryAdded)
        }
        TaxonomyCommand::DeleteSubcategory {
            category_id,
            subcategory_id,
        } => engine::delete_subcategory(state, *category_id, *subcategory_id)
            .map(|reassigned| Outcome::SubcategoryDeleted { reassigned }),
        TaxonomyCommand::RenameSubcategory {
            category_id,
            subcategory_id,
            name,
        } => engine::rename_subcategory(state, *category_id, *subcategory_id, name)
            .map(|_| Outcome::Renamed),
    }
}

/// Чистый переход: старое состояние + команда -> новое состояние + итог.
/// Исходное состояние не изменяется ни при успехе, ни при ошибке.
pub fn transition(
    state: &InventoryState,
    command: &TaxonomyCommand,
) -> UseCaseResult<(InventoryState, Outcome)> {
    let mut next = state.clone();
    let outcome = apply(&mut next, command)?;
    Ok((next, outcome))
}
