//! What each screen presents, as plain data.
//!
//! Views are rebuilt from the current [`AppState`](crate::state::AppState) snapshot and the
//! screen's local fields on every render. `Display` gives a text rendering used by the
//! demo binary.
use crate::model::{BroadcastReport, Category, DeliveryMethod, DraftOrder, Packaging, Product, ProductId};
use crate::router::Route;
use crate::screens::submission::SubmissionStatus;
use std::fmt::{self, Display, Formatter};

/// Follow-up actions offered after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    SendAnother,
    GoHome,
    ContinueShopping,
}

impl Offer {
    pub fn label(self) -> &'static str {
        match self {
            Offer::SendAnother => "Send another",
            Offer::GoHome => "Return home",
            Offer::ContinueShopping => "Continue shopping",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub available: bool,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            thumbnail: product.thumbnail().map(str::to_string),
            available: product.is_available,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub greeting: String,
    pub entries: Vec<Route>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AboutView {
    pub title: &'static str,
    pub paragraphs: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub query: String,
    /// Empty means "nothing found", not "no search".
    pub results: Vec<ProductCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Browse {
    Categories(Vec<Category>),
    Products {
        category: Option<Category>,
        products: Vec<ProductCard>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    pub loading: bool,
    pub error: Option<String>,
    pub query: String,
    pub search: Option<SearchView>,
    /// `None` while search results are shown.
    pub browse: Option<Browse>,
    pub can_clear_search: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub loading: bool,
    pub error: Option<String>,
    pub product: Option<Product>,
    pub image: Option<String>,
    /// 1-based position and image count.
    pub image_position: Option<(usize, usize)>,
    pub can_order: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderFormView {
    pub loading: bool,
    pub product_name: Option<String>,
    pub draft: DraftOrder,
    pub packaging_options: [Packaging; 4],
    pub delivery_options: [DeliveryMethod; 2],
    pub status: SubmissionStatus,
    pub can_submit: bool,
    pub validation_error: Option<String>,
    pub error: Option<String>,
    pub offers: Vec<Offer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub text: String,
    pub status: SubmissionStatus,
    pub can_submit: bool,
    pub validation_error: Option<String>,
    pub error: Option<String>,
    pub offers: Vec<Offer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastView {
    pub text: String,
    pub status: SubmissionStatus,
    pub can_submit: bool,
    pub validation_error: Option<String>,
    pub error: Option<String>,
    pub report: Option<BroadcastReport>,
    pub offers: Vec<Offer>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Home(HomeView),
    About(AboutView),
    Catalog(CatalogView),
    Product(ProductView),
    OrderForm(OrderFormView),
    MessageAdmin(MessageView),
    Broadcast(BroadcastView),
}

fn price(price: Option<f64>) -> String {
    price
        .map(|p| format!("{p:.0} ₽"))
        .unwrap_or_else(|| "price on request".to_string())
}

fn write_card(f: &mut Formatter<'_>, card: &ProductCard) -> fmt::Result {
    let availability = if card.available { "" } else { " (unavailable)" };
    writeln!(
        f,
        "  - {} [{}] {}{}",
        card.name,
        card.id,
        price(card.price),
        availability
    )
}

fn write_status(
    f: &mut Formatter<'_>,
    status: SubmissionStatus,
    validation_error: &Option<String>,
    error: &Option<String>,
    offers: &[Offer],
) -> fmt::Result {
    if let Some(problem) = validation_error {
        writeln!(f, "! {problem}")?;
    }
    match status {
        SubmissionStatus::Submitting => writeln!(f, "Sending...")?,
        SubmissionStatus::Failed => {
            if let Some(error) = error {
                writeln!(f, "! {error}")?;
            }
        }
        _ => {}
    }
    if !offers.is_empty() {
        let labels: Vec<_> = offers.iter().map(|o| o.label()).collect();
        writeln!(f, "[{}]", labels.join("] ["))?;
    }
    Ok(())
}

impl Display for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            View::Home(home) => {
                if let Some(notice) = &home.notice {
                    writeln!(f, "! {notice}")?;
                }
                writeln!(f, "{}", home.greeting)?;
                for entry in &home.entries {
                    writeln!(f, "  -> {entry}")?;
                }
                Ok(())
            }
            View::About(about) => {
                writeln!(f, "{}", about.title)?;
                for paragraph in &about.paragraphs {
                    writeln!(f, "{paragraph}")?;
                }
                Ok(())
            }
            View::Catalog(catalog) => {
                if catalog.loading {
                    writeln!(f, "Loading...")?;
                }
                if let Some(error) = &catalog.error {
                    writeln!(f, "! {error}")?;
                }
                if let Some(search) = &catalog.search {
                    if search.results.is_empty() {
                        writeln!(f, "Nothing found for \"{}\"", search.query)?;
                    } else {
                        writeln!(f, "Results for \"{}\":", search.query)?;
                        for card in &search.results {
                            write_card(f, card)?;
                        }
                    }
                }
                match &catalog.browse {
                    Some(Browse::Categories(categories)) => {
                        writeln!(f, "Categories:")?;
                        for category in categories {
                            writeln!(f, "  - {} [{}]", category.name, category.id)?;
                        }
                    }
                    Some(Browse::Products { category, products }) => {
                        let title = category.as_ref().map_or("Products", |c| c.name.as_str());
                        writeln!(f, "{title}:")?;
                        if products.is_empty() && !catalog.loading {
                            writeln!(f, "  No products in this category yet")?;
                        }
                        for card in products {
                            write_card(f, card)?;
                        }
                    }
                    None => {}
                }
                Ok(())
            }
            View::Product(view) => {
                if view.loading {
                    writeln!(f, "Loading...")?;
                }
                if let Some(error) = &view.error {
                    writeln!(f, "! {error}")?;
                }
                if let Some(product) = &view.product {
                    writeln!(f, "{} - {}", product.name, price(product.price))?;
                    if let (Some(image), Some((position, count))) = (&view.image, view.image_position) {
                        writeln!(f, "  image {position}/{count}: {image}")?;
                    }
                    if let Some(description) = &product.description {
                        writeln!(f, "  {description}")?;
                    }
                    if let Some(ingredients) = &product.ingredients {
                        writeln!(f, "  Ingredients: {ingredients}")?;
                    }
                    if let Some(info) = &product.additional_info {
                        writeln!(f, "  {info}")?;
                    }
                    if view.can_order {
                        writeln!(f, "[Order]")?;
                    } else {
                        writeln!(f, "Currently unavailable")?;
                    }
                }
                Ok(())
            }
            View::OrderForm(form) => {
                writeln!(
                    f,
                    "Order: {}",
                    form.product_name.as_deref().unwrap_or("...")
                )?;
                if form.status == SubmissionStatus::Succeeded {
                    writeln!(f, "Thank you! Your order has been placed.")?;
                } else {
                    let draft = &form.draft;
                    writeln!(f, "  name: {}", draft.customer_name)?;
                    writeln!(f, "  contact: {}", draft.customer_contact)?;
                    match draft.delivery_date {
                        Some(date) => writeln!(f, "  date: {date}")?,
                        None => writeln!(f, "  date: -")?,
                    }
                    writeln!(f, "  packaging: {}", draft.packaging)?;
                    writeln!(f, "  delivery: {}", draft.delivery_method)?;
                    if !draft.additional_comment.is_empty() {
                        writeln!(f, "  comment: {}", draft.additional_comment)?;
                    }
                }
                write_status(
                    f,
                    form.status,
                    &form.validation_error,
                    &form.error,
                    &form.offers,
                )
            }
            View::MessageAdmin(message) => {
                if message.status == SubmissionStatus::Succeeded {
                    writeln!(f, "Your message has been sent.")?;
                } else {
                    writeln!(f, "Message to the bakery: {}", message.text)?;
                }
                write_status(
                    f,
                    message.status,
                    &message.validation_error,
                    &message.error,
                    &message.offers,
                )
            }
            View::Broadcast(broadcast) => {
                match &broadcast.report {
                    Some(report) => {
                        writeln!(f, "Broadcast sent.")?;
                        writeln!(f, "  total customers: {}", report.total_customers)?;
                        writeln!(f, "  delivered: {}", report.successful_deliveries)?;
                        writeln!(f, "  failed: {}", report.failed_deliveries)?;
                    }
                    None => writeln!(f, "Broadcast: {}", broadcast.text)?,
                }
                write_status(
                    f,
                    broadcast.status,
                    &broadcast.validation_error,
                    &broadcast.error,
                    &broadcast.offers,
                )
            }
        }
    }
}
