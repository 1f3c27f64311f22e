use crate::domain::a002_inventory_item::ui::details::ItemDetails;
use crate::shared::app_store::use_app_store;
use crate::shared::dialog::confirm;
use crate::shared::icons::icon;
use contracts::domain::a002_inventory_item::{calculate_total_quantity, InventoryItem, ItemId};
use contracts::shared::InventoryState;
use contracts::usecases::u502_catalog_maintenance::{delete_item, filtered_items, ItemFilter};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct InventoryItemRow {
    pub id: ItemId,
    pub name: String,
    pub sku: String,
    pub placement: String,
    pub total: u64,
    pub price: String,
    pub updated_at: String,
}

impl InventoryItemRow {
    fn from_item(item: &InventoryItem, state: &InventoryState) -> Self {
        let placement = state
            .placement_names(item)
            .map(|(category, subcategory)| format!("{} / {}", category, subcategory))
            .unwrap_or_else(|| "-".to_string());

        Self {
            id: item.base.id,
            name: item.name().to_string(),
            sku: item.sku().to_string(),
            placement,
            total: calculate_total_quantity(&item.sizes),
            price: format!("{:.2}", item.price),
            updated_at: format_timestamp(item.base.metadata.updated_at),
        }
    }
}

fn format_timestamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// Что открыто в панели редактирования
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditorTarget {
    New,
    Edit(ItemId),
}

impl EditorTarget {
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            EditorTarget::New => None,
            EditorTarget::Edit(id) => Some(*id),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn InventoryItemList() -> impl IntoView {
    let store = use_app_store();
    let (search, set_search) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let editor = RwSignal::new(Option::<EditorTarget>::None);

    let rows = move || {
        let filter = ItemFilter::search(search.get());
        store.state.with(|state| {
            filtered_items(&state.catalog, |item| filter.matches(item))
                .into_iter()
                .map(|item| InventoryItemRow::from_item(item, state))
                .collect::<Vec<_>>()
        })
    };

    let handle_delete = move |id: ItemId, name: String| {
        if !confirm(&format!("Delete item \"{}\"?", name)) {
            return;
        }
        match store.mutate(|state| delete_item(state, id)) {
            Ok(_) => {
                set_error.set(None);
                if editor.get_untracked() == Some(EditorTarget::Edit(id)) {
                    editor.set(None);
                }
            }
            Err(e) => set_error.set(Some(e.to_string())),
        }
    };

    let on_saved = Callback::new(move |_| editor.set(None));
    let on_cancel = Callback::new(move |_| editor.set(None));

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Items"}</h1>
                </div>
                <div class="header__actions">
                    <input
                        type="search"
                        class="input"
                        placeholder="Search by name or SKU"
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                    <button class="button button--primary" on:click=move |_| editor.set(Some(EditorTarget::New))>
                        {icon("plus")}
                        {"New item"}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            {move || editor.get().map(|target| view! {
                <div class="editor-panel">
                    <ItemDetails id=target.item_id() on_saved=on_saved on_cancel=on_cancel />
                </div>
            })}

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"SKU"}</th>
                            <th class="table__header-cell">{"Name"}</th>
                            <th class="table__header-cell">{"Category"}</th>
                            <th class="table__header-cell">{"Total"}</th>
                            <th class="table__header-cell">{"Price"}</th>
                            <th class="table__header-cell">{"Updated"}</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || rows().into_iter().map(|row| {
                            let id = row.id;
                            let name = row.name.clone();
                            view! {
                                <tr class="table__row">
                                    <td class="table__cell">{row.sku}</td>
                                    <td class="table__cell">{row.name}</td>
                                    <td class="table__cell">{row.placement}</td>
                                    <td class="table__cell">{row.total}</td>
                                    <td class="table__cell">{row.price}</td>
                                    <td class="table__cell">{row.updated_at}</td>
                                    <td class="table__cell table__cell--actions">
                                        <button
                                            class="button button--ghost"
                                            title="Edit"
                                            on:click=move |_| editor.set(Some(EditorTarget::Edit(id)))
                                        >
                                            {icon("edit")}
                                        </button>
                                        <button
                                            class="button button--ghost"
                                            title="Delete"
                                            on:click=move |_| handle_delete(id, name.clone())
                                        >
                                            {icon("delete")}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_target_item_id() {
        let id = ItemId::new_v4();
        assert_eq!(EditorTarget::New.item_id(), None);
        assert_eq!(EditorTarget::Edit(id).item_id(), Some(id));
    }
}
