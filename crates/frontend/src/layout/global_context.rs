use leptos::prelude::*;

/// Страницы приложения
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    /// Остатки и продажа (все пользователи)
    Stock,
    /// Таблица товаров (администратор)
    Items,
    /// Категории и подкатегории (администратор)
    Categories,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Stock => "Stock",
            Page::Items => "Items",
            Page::Categories => "Categories",
        }
    }

    /// Имя иконки для `shared::icons::icon`
    pub fn icon_name(&self) -> &'static str {
        match self {
            Page::Stock => "inventory",
            Page::Items => "products",
            Page::Categories => "folder-open",
        }
    }

    pub fn requires_admin(&self) -> bool {
        !matches!(self, Page::Stock)
    }

    pub fn all() -> [Page; 3] {
        [Page::Stock, Page::Items, Page::Categories]
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Page>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Page::Stock),
        }
    }

    pub fn open_page(&self, page: Page) {
        log::debug!("open page: {}", page.title());
        self.active.set(page);
    }

    /// После выхода показываем витрину, доступную любому пользователю
    pub fn reset(&self) {
        self.active.set(Page::Stock);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_stock_is_open_to_everyone() {
        let open: Vec<Page> = Page::all()
            .into_iter()
            .filter(|p| !p.requires_admin())
            .collect();
        assert_eq!(open, vec![Page::Stock]);
    }
}
