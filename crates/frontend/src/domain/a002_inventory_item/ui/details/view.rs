use super::view_model::ItemDetailsViewModel;
use crate::shared::app_store::use_app_store;
use crate::shared::icons::icon;
use contracts::domain::a002_inventory_item::{calculate_total_quantity, ItemId, SizeLabel};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;

#[component]
pub fn ItemDetails(
    id: Option<ItemId>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let store = use_app_store();
    let vm = ItemDetailsViewModel::new();
    vm.load_if_needed(store, id);

    let category_options = move || {
        store.state.with(|s| {
            s.taxonomy
                .iter()
                .map(|c| (c.id.as_string(), c.name.clone()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="details-container item-details">
            <div class="details-header">
                <h3>
                    {move || if vm.is_edit_mode() { "Edit item" } else { "New item" }}
                </h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="item_name">{"Name"}</label>
                    <input
                        type="text"
                        id="item_name"
                        prop:value=move || vm.form.get().name
                        on:input=move |ev| vm.form.update(|f| f.name = event_target_value(&ev))
                        placeholder="Oxford Button-Down"
                    />
                </div>

                <div class="form-group">
                    <label for="item_sku">{"SKU"}</label>
                    <input
                        type="text"
                        id="item_sku"
                        prop:value=move || vm.form.get().sku
                        on:input=move |ev| vm.form.update(|f| f.sku = event_target_value(&ev))
                        placeholder="MEN-OXF-001"
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="item_category">{"Category"}</label>
                        <select
                            id="item_category"
                            prop:value=move || {
                                vm.form
                                    .with(|f| f.category_id.map(|c| c.as_string()))
                                    .unwrap_or_default()
                            }
                            on:change=move |ev| vm.select_category(&event_target_value(&ev))
                        >
                            <option value="">{"(none)"}</option>
                            {move || {
                                category_options()
                                    .into_iter()
                                    .map(|(value, name)| view! { <option value=value>{name}</option> })
                                    .collect_view()
                            }}
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="item_subcategory">{"Subcategory"}</label>
                        <select
                            id="item_subcategory"
                            prop:value=move || {
                                vm.form
                                    .with(|f| f.subcategory_id.map(|s| s.as_string()))
                                    .unwrap_or_default()
                            }
                            on:change=move |ev| vm.select_subcategory(&event_target_value(&ev))
                        >
                            <option value="">{"Default"}</option>
                            {move || {
                                vm.subcategory_options(store)
                                    .into_iter()
                                    .map(|(id, name)| view! { <option value=id.as_string()>{name}</option> })
                                    .collect_view()
                            }}
                        </select>
                    </div>
                </div>

                <div class="form-group">
                    <label>{"Quantity by size"}</label>
                    <div class="size-grid">
                        {SizeLabel::all()
                            .into_iter()
                            .map(|size| {
                                view! {
                                    <div class="size-grid__cell">
                                        <span class="size-grid__label">{size.as_str()}</span>
                                        <input
                                            type="text"
                                            inputmode="numeric"
                                            prop:value=move || {
                                                vm.inputs.with(|i| i.sizes.get(&size).cloned().unwrap_or_default())
                                            }
                                            on:input=move |ev| vm.set_quantity(size, event_target_value(&ev))
                                        />
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                    <div class="size-grid__total">
                        {move || format!("Total: {}", vm.form.with(|f| calculate_total_quantity(&f.sizes)))}
                    </div>
                </div>

                <div class="form-group">
                    <label for="item_price">{"Price"}</label>
                    <input
                        type="text"
                        id="item_price"
                        inputmode="decimal"
                        prop:value=move || vm.inputs.with(|i| i.price.clone())
                        on:input=move |ev| vm.set_price(event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="item_description">{"Description"}</label>
                    <textarea
                        id="item_description"
                        prop:value=move || vm.form.get().description.unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.form.update(|f| {
                                f.description = if value.is_empty() { None } else { Some(value) };
                            });
                        }
                        rows="3"
                    />
                </div>

                <div class="form-group">
                    <label for="item_image">{"Image"}</label>
                    <input
                        type="file"
                        id="item_image"
                        accept="image/*"
                        on:change=move |ev| vm.attach_image(store, &ev)
                    />
                    <Show when=move || vm.uploading.get()>
                        <span class="hint">{"Reading image..."}</span>
                    </Show>
                    {move || vm.form.get().image.map(|src| view! {
                        <div class="image-preview">
                            <img src=src alt="Item image" />
                            <button class="button button--ghost" on:click=move |_| vm.clear_image()>
                                {icon("delete")}
                            </button>
                        </div>
                    })}
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| vm.save_command(store, on_saved)
                    disabled=move || !vm.is_form_valid() || vm.uploading.get()
                >
                    {move || if vm.is_edit_mode() { "Save" } else { "Create" }}
                </button>
                <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                    {"Cancel"}
                </button>
            </div>
        </div>
    }
}
