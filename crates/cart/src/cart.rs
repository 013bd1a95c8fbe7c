use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_catalog::{Product, ProductId};
use storefront_core::{Aggregate, AggregateRoot, CartId, DomainError, Money, OrderId};
use storefront_events::Event;

use crate::checkout::DeliveryInfo;

/// Whether the cart holds anything. Drives the cart badge and whether
/// checkout is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartState {
    Empty,
    Populated,
}

/// Line item: snapshot of the product fields the cart needs, plus quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    /// Price in smallest currency unit.
    pub unit_price: Money,
    pub image: String,
    /// Always >= 1.
    pub quantity: u32,
}

impl LineItem {
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Aggregate root: Cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: CartId,
    lines: Vec<LineItem>,
    version: u64,
    created: bool,
}

impl Cart {
    /// Create an empty, not-yet-opened aggregate instance.
    pub fn empty(id: CartId) -> Self {
        Self {
            id,
            lines: Vec::new(),
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> CartId {
        self.id
    }

    /// Line items in insertion order.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.created
    }

    pub fn state(&self) -> CartState {
        if self.lines.is_empty() {
            CartState::Empty
        } else {
            CartState::Populated
        }
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut LineItem> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }
}

impl AggregateRoot for Cart {
    type Id = CartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: OpenCart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenCart {
    pub cart_id: CartId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub image: String,
    pub occurred_at: DateTime<Utc>,
}

impl AddItem {
    /// Copy the fields the cart keeps from a catalog listing.
    pub fn from_product(cart_id: CartId, product: &Product, occurred_at: DateTime<Utc>) -> Self {
        Self {
            cart_id,
            product_id: product.id_typed(),
            name: product.name().to_string(),
            unit_price: product.price(),
            image: product.image().to_string(),
            occurred_at,
        }
    }
}

/// Command: SetQuantity.
///
/// `quantity` is signed because it usually comes straight from a `-` button;
/// anything below 1 is clamped to 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetQuantity {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    pub cart_id: CartId,
    pub order_id: OrderId,
    pub delivery: DeliveryInfo,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    OpenCart(OpenCart),
    AddItem(AddItem),
    SetQuantity(SetQuantity),
    RemoveItem(RemoveItem),
    Checkout(Checkout),
}

/// Event: CartOpened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartOpened {
    pub cart_id: CartId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemAdded (a new line with quantity 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub image: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemQuantityChanged (absolute quantity, always >= 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemQuantityChanged {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CheckedOut. Carries the lines as they were at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckedOut {
    pub cart_id: CartId,
    pub order_id: OrderId,
    pub lines: Vec<LineItem>,
    pub delivery: DeliveryInfo,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    CartOpened(CartOpened),
    ItemAdded(ItemAdded),
    ItemQuantityChanged(ItemQuantityChanged),
    ItemRemoved(ItemRemoved),
    CheckedOut(CheckedOut),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::CartOpened(_) => "cart.opened",
            CartEvent::ItemAdded(_) => "cart.item_added",
            CartEvent::ItemQuantityChanged(_) => "cart.item_quantity_changed",
            CartEvent::ItemRemoved(_) => "cart.item_removed",
            CartEvent::CheckedOut(_) => "cart.checked_out",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::CartOpened(e) => e.occurred_at,
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::ItemQuantityChanged(e) => e.occurred_at,
            CartEvent::ItemRemoved(e) => e.occurred_at,
            CartEvent::CheckedOut(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::CartOpened(e) => {
                self.id = e.cart_id;
                self.lines.clear();
                self.created = true;
            }
            CartEvent::ItemAdded(e) => {
                self.lines.push(LineItem {
                    product_id: e.product_id,
                    name: e.name.clone(),
                    unit_price: e.unit_price,
                    image: e.image.clone(),
                    quantity: 1,
                });
            }
            CartEvent::ItemQuantityChanged(e) => {
                if let Some(line) = self.line_mut(e.product_id) {
                    line.quantity = e.quantity.max(1);
                }
            }
            CartEvent::ItemRemoved(e) => {
                self.lines.retain(|l| l.product_id != e.product_id);
            }
            CartEvent::CheckedOut(_) => {
                self.lines.clear();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::OpenCart(cmd) => self.handle_open(cmd),
            CartCommand::AddItem(cmd) => self.handle_add_item(cmd),
            CartCommand::SetQuantity(cmd) => self.handle_set_quantity(cmd),
            CartCommand::RemoveItem(cmd) => self.handle_remove_item(cmd),
            CartCommand::Checkout(cmd) => self.handle_checkout(cmd),
        }
    }
}

impl Cart {
    fn ensure_open(&self, cart_id: CartId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        if self.id != cart_id {
            return Err(DomainError::invariant("cart_id mismatch"));
        }
        Ok(())
    }

    fn handle_open(&self, cmd: &OpenCart) -> Result<Vec<CartEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("cart already open"));
        }

        Ok(vec![CartEvent::CartOpened(CartOpened {
            cart_id: cmd.cart_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add_item(&self, cmd: &AddItem) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_open(cmd.cart_id)?;

        // Same product again merges into the existing line.
        if let Some(line) = self.line(cmd.product_id) {
            let quantity = line
                .quantity
                .checked_add(1)
                .ok_or_else(|| DomainError::invariant("line quantity limit reached"))?;

            return Ok(vec![CartEvent::ItemQuantityChanged(ItemQuantityChanged {
                cart_id: cmd.cart_id,
                product_id: cmd.product_id,
                quantity,
                occurred_at: cmd.occurred_at,
            })]);
        }

        Ok(vec![CartEvent::ItemAdded(ItemAdded {
            cart_id: cmd.cart_id,
            product_id: cmd.product_id,
            name: cmd.name.clone(),
            unit_price: cmd.unit_price,
            image: cmd.image.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_set_quantity(&self, cmd: &SetQuantity) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_open(cmd.cart_id)?;

        let line = self.line(cmd.product_id).ok_or_else(DomainError::not_found)?;

        let quantity = u32::try_from(cmd.quantity.max(1)).unwrap_or(u32::MAX);
        if quantity == line.quantity {
            return Ok(Vec::new());
        }

        Ok(vec![CartEvent::ItemQuantityChanged(ItemQuantityChanged {
            cart_id: cmd.cart_id,
            product_id: cmd.product_id,
            quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove_item(&self, cmd: &RemoveItem) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_open(cmd.cart_id)?;

        if self.line(cmd.product_id).is_none() {
            return Ok(Vec::new());
        }

        Ok(vec![CartEvent::ItemRemoved(ItemRemoved {
            cart_id: cmd.cart_id,
            product_id: cmd.product_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_checkout(&self, cmd: &Checkout) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_open(cmd.cart_id)?;

        if self.lines.is_empty() {
            return Err(DomainError::validation("cannot check out an empty cart"));
        }

        let delivery = cmd.delivery.validated()?;

        Ok(vec![CartEvent::CheckedOut(CheckedOut {
            cart_id: cmd.cart_id,
            order_id: cmd.order_id,
            lines: self.lines.clone(),
            delivery,
            occurred_at: cmd.occurred_at,
        })])
    }
}
