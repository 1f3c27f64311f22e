use crate::shared::app_store::AppStore;
use crate::shared::image;
use contracts::domain::a001_category::{CategoryId, SubcategoryId};
use contracts::domain::a002_inventory_item::{InventoryItemDto, ItemId, SizeLabel};
use contracts::domain::common::AggregateId;
use contracts::usecases::u502_catalog_maintenance::{add_item, update_item};
use leptos::prelude::*;
use std::collections::BTreeMap;

/// Raw text of the numeric inputs, kept as typed until it parses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericInputs {
    pub price: String,
    pub sizes: BTreeMap<SizeLabel, String>,
}

impl NumericInputs {
    pub fn from_dto(dto: &InventoryItemDto) -> Self {
        Self {
            price: dto.price.to_string(),
            sizes: SizeLabel::all()
                .into_iter()
                .map(|size| (size, dto.sizes.get(size).to_string()))
                .collect(),
        }
    }

    /// Parse every input into `dto`; the first bad input is reported
    pub fn apply_to(&self, dto: &mut InventoryItemDto) -> Result<(), String> {
        let price = parse_price(&self.price)?;
        let mut quantities = Vec::with_capacity(self.sizes.len());
        for (size, raw) in &self.sizes {
            quantities.push((*size, parse_quantity(*size, raw)?));
        }

        dto.price = price;
        for (size, quantity) in quantities {
            dto.sizes.set(size, quantity);
        }
        Ok(())
    }
}

/// Empty input means 0
pub fn parse_price(raw: &str) -> Result<f64, String> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(0.0);
    }
    match text.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(format!("Price \"{}\" is not a valid amount", text)),
    }
}

/// Empty input means 0
pub fn parse_quantity(size: SizeLabel, raw: &str) -> Result<u32, String> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse::<u32>().map_err(|_| {
        format!(
            "Quantity for size {} must be a whole number, got \"{}\"",
            size, text
        )
    })
}

/// Required text fields of the form
pub fn check_required(dto: &InventoryItemDto) -> Result<(), String> {
    if dto.name.trim().is_empty() {
        return Err("Name is required".to_string());
    }
    if dto.sku.trim().is_empty() {
        return Err("SKU is required".to_string());
    }
    Ok(())
}

/// ViewModel for the item details form
#[derive(Clone, Copy)]
pub struct ItemDetailsViewModel {
    pub form: RwSignal<InventoryItemDto>,
    pub inputs: RwSignal<NumericInputs>,
    pub error: RwSignal<Option<String>>,
    pub uploading: RwSignal<bool>,
}

impl ItemDetailsViewModel {
    pub fn new() -> Self {
        let form = InventoryItemDto::default();
        Self {
            inputs: RwSignal::new(NumericInputs::from_dto(&form)),
            form: RwSignal::new(form),
            error: RwSignal::new(None),
            uploading: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    pub fn is_form_valid(&self) -> bool {
        self.form.with(|f| check_required(f).is_ok())
    }

    /// Fill the form from the store when editing an existing item
    pub fn load_if_needed(&self, store: AppStore, id: Option<ItemId>) {
        let Some(id) = id else {
            return;
        };
        match store
            .state
            .with_untracked(|s| s.item(id).map(InventoryItemDto::from))
        {
            Some(dto) => {
                self.inputs.set(NumericInputs::from_dto(&dto));
                self.form.set(dto);
            }
            None => self
                .error
                .set(Some(format!("Item {} no longer exists", id.as_string()))),
        }
    }

    /// Subcategories of the selected category as (id, name)
    pub fn subcategory_options(&self, store: AppStore) -> Vec<(SubcategoryId, String)> {
        let Some(category_id) = self.form.with(|f| f.category_id) else {
            return Vec::new();
        };
        store.state.with(|s| {
            s.taxonomy
                .get(category_id)
                .map(|c| {
                    c.subcategories
                        .iter()
                        .map(|sub| (sub.id, sub.name.clone()))
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    /// A new category resets the subcategory; saving falls back to Default
    pub fn select_category(&self, raw: &str) {
        let category_id = CategoryId::from_string(raw).ok();
        self.form.update(|f| {
            if f.category_id != category_id {
                f.category_id = category_id;
                f.subcategory_id = None;
            }
        });
    }

    pub fn select_subcategory(&self, raw: &str) {
        let subcategory_id = SubcategoryId::from_string(raw).ok();
        self.form.update(|f| f.subcategory_id = subcategory_id);
    }

    pub fn set_quantity(&self, size: SizeLabel, raw: String) {
        self.inputs.update(|i| {
            i.sizes.insert(size, raw);
        });
        self.sync_inputs();
    }

    pub fn set_price(&self, raw: String) {
        self.inputs.update(|i| i.price = raw);
        self.sync_inputs();
    }

    /// Copy parsed numbers into the form, or show why they do not parse
    fn sync_inputs(&self) -> bool {
        let mut form = self.form.get_untracked();
        match self.inputs.with_untracked(|i| i.apply_to(&mut form)) {
            Ok(()) => {
                self.form.set(form);
                self.error.set(None);
                true
            }
            Err(e) => {
                self.error.set(Some(e));
                false
            }
        }
    }

    /// Read the selected image file into the form as a data URL
    pub fn attach_image(&self, store: AppStore, ev: &web_sys::Event) {
        let Some(file) = image::selected_file(ev) else {
            return;
        };
        let form = self.form;
        let error = self.error;
        let uploading = self.uploading;
        uploading.set(true);
        image::read_as_data_url(file, store.max_image_bytes(), move |result| {
            uploading.set(false);
            match result {
                Ok(data_url) => {
                    error.set(None);
                    form.update(|f| f.image = Some(data_url));
                }
                Err(e) => error.set(Some(e)),
            }
        });
    }

    pub fn clear_image(&self) {
        self.form.update(|f| f.image = None);
    }

    /// Save through the store; `on_saved` runs only on success
    pub fn save_command(&self, store: AppStore, on_saved: Callback<()>) {
        if !self.sync_inputs() {
            return;
        }
        let current = self.form.get_untracked();
        if let Err(e) = check_required(&current) {
            self.error.set(Some(e));
            return;
        }

        let result = if current.id.is_some() {
            store.mutate(|state| update_item(state, &current))
        } else {
            store.mutate(|state| add_item(state, &current).map(|_| ()))
        };

        match result {
            Ok(()) => {
                self.error.set(None);
                on_saved.run(());
            }
            Err(e) => self.error.set(Some(e.to_string())),
        }
    }
}

impl Default for ItemDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
