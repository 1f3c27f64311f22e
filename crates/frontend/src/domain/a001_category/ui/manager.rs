//! Управление категориями и подкатегориями.
//!
//! Каждое действие отправляется в стор как `TaxonomyCommand`; товары
//! удаляемых узлов переносятся движком, экран лишь спрашивает подтверждение.

use crate::shared::app_store::{use_app_store, AppStore};
use crate::shared::dialog::confirm;
use crate::shared::icons::icon;
use contracts::domain::a001_category::{CategoryDefinition, CategoryId, Subcategory, UNCATEGORIZED};
use contracts::usecases::u501_taxonomy_consistency::{
    item_count_for, item_count_for_category, Outcome, TaxonomyCommand,
};
use leptos::prelude::*;

/// Shared feedback slots of the page
#[derive(Clone, Copy)]
struct Feedback {
    error: RwSignal<Option<String>>,
    notice: RwSignal<Option<String>>,
}

impl Feedback {
    fn new() -> Self {
        Self {
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
        }
    }

    /// Dispatch a command; true when the store accepted it
    fn run(&self, store: AppStore, command: TaxonomyCommand) -> bool {
        match store.dispatch(&command) {
            Ok(outcome) => {
                self.error.set(None);
                self.notice.set(describe(&outcome));
                true
            }
            Err(e) => {
                self.notice.set(None);
                self.error.set(Some(e.to_string()));
                false
            }
        }
    }
}

fn describe(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::CategoryDeleted { reassigned } if *reassigned > 0 => Some(format!(
            "Category deleted, {} item(s) moved to {}",
            reassigned, UNCATEGORIZED
        )),
        Outcome::SubcategoryDeleted { reassigned } if *reassigned > 0 => Some(format!(
            "Subcategory deleted, {} item(s) moved to Default",
            reassigned
        )),
        _ => None,
    }
}

#[component]
pub fn CategoryManager() -> impl IntoView {
    let store = use_app_store();
    let feedback = Feedback::new();
    let (new_name, set_new_name) = signal(String::new());

    let add_category = move || {
        let command = TaxonomyCommand::AddCategory {
            name: new_name.get_untracked(),
        };
        if feedback.run(store, command) {
            set_new_name.set(String::new());
        }
    };

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Categories"}</h1>
                </div>
                <div class="header__actions">
                    <input
                        type="text"
                        class="input"
                        placeholder="New category"
                        prop:value=move || new_name.get()
                        on:input=move |ev| set_new_name.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                add_category();
                            }
                        }
                    />
                    <button class="button button--primary" on:click=move |_| add_category()>
                        {icon("plus")}
                        {"Add category"}
                    </button>
                </div>
            </div>

            {move || feedback.error.get().map(|e| view! { <div class="error">{e}</div> })}
            {move || feedback.notice.get().map(|n| view! { <div class="notice">{n}</div> })}

            <div class="category-grid">
                {move || {
                    store
                        .state
                        .with(|s| s.taxonomy.categories().to_vec())
                        .into_iter()
                        .map(|category| view! { <CategoryCard category=category feedback=feedback /> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
fn CategoryCard(category: CategoryDefinition, feedback: Feedback) -> impl IntoView {
    let store = use_app_store();
    let category_id = category.id;
    let is_sentinel = category.is_sentinel();
    let title = category.name.clone();

    let (renaming, set_renaming) = signal(false);
    let (rename_value, set_rename_value) = signal(category.name.clone());
    let (new_sub, set_new_sub) = signal(String::new());

    let delete_category = {
        let name = category.name.clone();
        move || {
            let affected = store
                .state
                .with_untracked(|s| item_count_for_category(&s.catalog, category_id));
            if affected > 0
                && !confirm(&format!(
                    "Delete category \"{}\"? {} item(s) will be moved to {}.",
                    name, affected, UNCATEGORIZED
                ))
            {
                return;
            }
            feedback.run(store, TaxonomyCommand::DeleteCategory { category_id });
        }
    };

    let save_rename = move || {
        let command = TaxonomyCommand::RenameCategory {
            category_id,
            name: rename_value.get_untracked(),
        };
        if feedback.run(store, command) {
            set_renaming.set(false);
        }
    };

    let add_subcategory = move || {
        let command = TaxonomyCommand::AddSubcategory {
            category_id,
            name: new_sub.get_untracked(),
        };
        if feedback.run(store, command) {
            set_new_sub.set(String::new());
        }
    };

    let chips = category
        .subcategories
        .into_iter()
        .map(|sub| view! { <SubcategoryChip category_id=category_id category_name=title.clone() subcategory=sub feedback=feedback /> })
        .collect_view();

    view! {
        <div class="category-card" class:category-card--sentinel=is_sentinel>
            <div class="category-card__header">
                <Show
                    when=move || renaming.get()
                    fallback={
                        let title = title.clone();
                        move || view! { <h3 class="category-card__title">{title.clone()}</h3> }
                    }
                >
                    <input
                        type="text"
                        class="input"
                        prop:value=move || rename_value.get()
                        on:input=move |ev| set_rename_value.set(event_target_value(&ev))
                    />
                    <button class="button button--primary" on:click=move |_| save_rename()>
                        {"Save"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| set_renaming.set(false)>
                        {"Cancel"}
                    </button>
                </Show>

                <Show when=move || !is_sentinel && !renaming.get()>
                    <div class="category-card__actions">
                        <button class="button button--ghost" title="Rename" on:click=move |_| set_renaming.set(true)>
                            {icon("edit")}
                        </button>
                        <button
                            class="button button--ghost"
                            title="Delete"
                            on:click={
                                let delete_category = delete_category.clone();
                                move |_| delete_category()
                            }
                        >
                            {icon("delete")}
                        </button>
                    </div>
                </Show>
            </div>

            <div class="category-card__subcategories">{chips}</div>

            <div class="category-card__add">
                <input
                    type="text"
                    class="input"
                    placeholder="New subcategory"
                    prop:value=move || new_sub.get()
                    on:input=move |ev| set_new_sub.set(event_target_value(&ev))
                />
                <button class="button button--secondary" on:click=move |_| add_subcategory()>
                    {icon("plus")}
                </button>
            </div>
        </div>
    }
}

#[component]
fn SubcategoryChip(
    category_id: CategoryId,
    category_name: String,
    subcategory: Subcategory,
    feedback: Feedback,
) -> impl IntoView {
    let store = use_app_store();
    let subcategory_id = subcategory.id;
    let is_default = subcategory.is_default();
    let name = subcategory.name.clone();

    let (renaming, set_renaming) = signal(false);
    let (rename_value, set_rename_value) = signal(subcategory.name.clone());

    let delete_subcategory = {
        let name = name.clone();
        move || {
            let affected = store
                .state
                .with_untracked(|s| item_count_for(&s.catalog, category_id, subcategory_id));
            if affected > 0
                && !confirm(&format!(
                    "Delete subcategory \"{}\" from \"{}\"? {} item(s) will be moved to Default.",
                    name, category_name, affected
                ))
            {
                return;
            }
            feedback.run(
                store,
                TaxonomyCommand::DeleteSubcategory {
                    category_id,
                    subcategory_id,
                },
            );
        }
    };

    let save_rename = move || {
        let command = TaxonomyCommand::RenameSubcategory {
            category_id,
            subcategory_id,
            name: rename_value.get_untracked(),
        };
        if feedback.run(store, command) {
            set_renaming.set(false);
        }
    };

    view! {
        <span class="chip" class:chip--default=is_default>
            <Show
                when=move || renaming.get()
                fallback={
                    let name = name.clone();
                    move || view! { <span class="chip__label">{name.clone()}</span> }
                }
            >
                <input
                    type="text"
                    class="input input--small"
                    prop:value=move || rename_value.get()
                    on:input=move |ev| set_rename_value.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            save_rename();
                        } else if ev.key() == "Escape" {
                            set_renaming.set(false);
                        }
                    }
                />
            </Show>
            <Show when=move || !is_default && !renaming.get()>
                <button class="chip__action" title="Rename" on:click=move |_| set_renaming.set(true)>
                    {icon("edit")}
                </button>
            </Show>
            // Default is removable only while another subcategory remains; the engine decides
            <button
                class="chip__action"
                title="Delete"
                on:click={
                    let delete_subcategory = delete_subcategory.clone();
                    move |_| delete_subcategory()
                }
            >
                {icon("delete")}
            </button>
        </span>
    }
}
