//! Витрина остатков: поиск, отбор по категории и списание продаж.

use crate::shared::app_store::use_app_store;
use contracts::domain::a001_category::{CategoryId, SubcategoryId};
use contracts::domain::a002_inventory_item::{calculate_total_quantity, InventoryItem, ItemId, SizeLabel};
use contracts::domain::common::AggregateId;
use contracts::usecases::u502_catalog_maintenance::{filtered_items, record_sale, ItemFilter};
use leptos::prelude::*;

#[derive(Clone, Debug)]
struct StockRow {
    id: ItemId,
    name: String,
    sku: String,
    placement: String,
    sizes: Vec<(SizeLabel, u32)>,
    total: u64,
    price: f64,
    image: Option<String>,
}

#[component]
pub fn StockView() -> impl IntoView {
    let store = use_app_store();
    let (search, set_search) = signal(String::new());
    let (category, set_category) = signal::<Option<CategoryId>>(None);
    let (subcategory, set_subcategory) = signal::<Option<SubcategoryId>>(None);

    let category_options = move || {
        store.state.with(|s| {
            s.taxonomy
                .iter()
                .map(|c| (c.id.as_string(), c.name.clone()))
                .collect::<Vec<_>>()
        })
    };

    let subcategory_options = move || {
        let Some(category_id) = category.get() else {
            return Vec::new();
        };
        store.state.with(|s| {
            s.taxonomy
                .get(category_id)
                .map(|c| {
                    c.subcategories
                        .iter()
                        .map(|sub| (sub.id.as_string(), sub.name.clone()))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };

    let rows = move || {
        let filter = ItemFilter {
            search: search.get(),
            category_id: category.get(),
            subcategory_id: subcategory.get(),
        };
        store.state.with(|state| {
            filtered_items(&state.catalog, |item| filter.matches(item))
                .into_iter()
                .map(|item: &InventoryItem| StockRow {
                    id: item.base.id,
                    name: item.name().to_string(),
                    sku: item.sku().to_string(),
                    placement: state
                        .placement_names(item)
                        .map(|(c, s)| format!("{} / {}", c, s))
                        .unwrap_or_default(),
                    sizes: item.sizes.iter_all().collect(),
                    total: calculate_total_quantity(&item.sizes),
                    price: item.price,
                    image: item.image.clone(),
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Stock"}</h1>
                </div>
                <div class="header__actions">
                    <input
                        type="search"
                        class="input"
                        placeholder="Search by name or SKU"
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                    <select
                        prop:value=move || category.get().map(|c| c.as_string()).unwrap_or_default()
                        on:change=move |ev| {
                            set_category.set(CategoryId::from_string(&event_target_value(&ev)).ok());
                            set_subcategory.set(None);
                        }
                    >
                        <option value="">{"All categories"}</option>
                        {move || category_options()
                            .into_iter()
                            .map(|(value, name)| view! { <option value=value>{name}</option> })
                            .collect_view()}
                    </select>
                    <select
                        prop:value=move || subcategory.get().map(|s| s.as_string()).unwrap_or_default()
                        disabled=move || category.get().is_none()
                        on:change=move |ev| {
                            set_subcategory.set(SubcategoryId::from_string(&event_target_value(&ev)).ok());
                        }
                    >
                        <option value="">{"All subcategories"}</option>
                        {move || subcategory_options()
                            .into_iter()
                            .map(|(value, name)| view! { <option value=value>{name}</option> })
                            .collect_view()}
                    </select>
                </div>
            </div>

            <div class="stock-grid">
                {move || {
                    let rows = rows();
                    if rows.is_empty() {
                        return view! { <p class="empty">{"No items match the current filter"}</p> }.into_any();
                    }
                    rows.into_iter()
                        .map(|row| view! { <StockCard row=row /> })
                        .collect_view()
                        .into_any()
                }}
            </div>
        </div>
    }
}

#[component]
fn StockCard(row: StockRow) -> impl IntoView {
    let sizes = row
        .sizes
        .iter()
        .map(|(size, qty)| {
            view! {
                <span class="size-badge" class:size-badge--empty=*qty == 0>
                    {format!("{} {}", size, qty)}
                </span>
            }
        })
        .collect_view();

    view! {
        <div class="stock-card">
            {row.image.map(|src| view! { <img class="stock-card__image" src=src alt="" /> })}
            <div class="stock-card__body">
                <h3 class="stock-card__title">{row.name}</h3>
                <div class="stock-card__meta">{row.sku}" · "{row.placement}</div>
                <div class="stock-card__sizes">{sizes}</div>
                <div class="stock-card__footer">
                    <span>{format!("Total: {}", row.total)}</span>
                    <span>{format!("{:.2}", row.price)}</span>
                </div>
                <SellControl item_id=row.id />
            </div>
        </div>
    }
}

/// Списание продажи по одному размеру
#[component]
fn SellControl(item_id: ItemId) -> impl IntoView {
    let store = use_app_store();
    let (size, set_size) = signal(SizeLabel::M);
    let (quantity, set_quantity) = signal(1u32);
    let (error, set_error) = signal::<Option<String>>(None);

    let sell = move || {
        let (size, quantity) = (size.get_untracked(), quantity.get_untracked());
        match store.mutate(|state| record_sale(state, item_id, size, quantity)) {
            Ok(_) => set_error.set(None),
            Err(e) => set_error.set(Some(e.to_string())),
        }
    };

    view! {
        <div class="sell-control">
            <select
                prop:value=move || size.get().as_str()
                on:change=move |ev| {
                    if let Some(parsed) = SizeLabel::parse(&event_target_value(&ev)) {
                        set_size.set(parsed);
                    }
                }
            >
                {SizeLabel::all()
                    .into_iter()
                    .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                    .collect_view()}
            </select>
            <input
                type="number"
                min="1"
                prop:value=move || quantity.get().to_string()
                on:input=move |ev| {
                    set_quantity.set(event_target_value(&ev).trim().parse().unwrap_or(0));
                }
            />
            <button class="button button--primary" on:click=move |_| sell()>
                {"Sell"}
            </button>
            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}
        </div>
    }
}
