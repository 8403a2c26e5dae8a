use anyhow::Context;
use chrono::NaiveDate;
use portfolio_core::task::local_today;
use portfolio_core::{
    CartLedger, KeyValueStore, OrderConfirmation, Priority, PriorityFilter, StatusFilter, Task,
    TaskDraft, TaskStore, catalog,
};
use tracing::{info, warn};

/// Key under which the shell keeps the cart between invocations.
pub const CART_KEY: &str = "cart";

pub fn list_catalog() {
    for item in catalog::items() {
        println!("{:>2}  {:<30} {}", item.id, item.title, item.price);
        println!("    {}", item.description);
    }
}

fn load_cart<S: KeyValueStore>(storage: &S) -> CartLedger {
    match storage.get(CART_KEY) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|err| {
            warn!(error = %err, "Error loading cart, starting with an empty cart");
            CartLedger::new()
        }),
        Ok(None) => CartLedger::new(),
        Err(err) => {
            warn!(error = %err, "Error reading cart storage, starting with an empty cart");
            CartLedger::new()
        }
    }
}

fn save_cart<S: KeyValueStore>(storage: &mut S, cart: &CartLedger) -> anyhow::Result<()> {
    let json = serde_json::to_string(cart)?;
    storage.set(CART_KEY, json).context("failed to save cart")?;
    Ok(())
}

fn print_cart(cart: &CartLedger) {
    if cart.is_empty() {
        println!("Your cart is empty");
        return;
    }
    for line in cart.items() {
        println!(
            "{:>2}  {:<30} {} x{}  {}",
            line.id,
            line.title,
            line.price,
            line.quantity,
            line.subtotal()
        );
    }
    println!("Subtotal: {}", cart.total());
}

pub fn cart_add<S: KeyValueStore>(storage: &mut S, id: u32) -> anyhow::Result<()> {
    let item = catalog::find(id)
        .with_context(|| format!("no catalog item with id {id}"))?;
    let mut cart = load_cart(storage);
    cart.add(item);
    save_cart(storage, &cart)?;
    print_cart(&cart);
    Ok(())
}

pub fn cart_remove<S: KeyValueStore>(storage: &mut S, id: u32) -> anyhow::Result<()> {
    let mut cart = load_cart(storage);
    cart.remove(id);
    save_cart(storage, &cart)?;
    print_cart(&cart);
    Ok(())
}

pub fn cart_set<S: KeyValueStore>(storage: &mut S, id: u32, quantity: i64) -> anyhow::Result<()> {
    let mut cart = load_cart(storage);
    cart.set_quantity(id, quantity);
    save_cart(storage, &cart)?;
    print_cart(&cart);
    Ok(())
}

pub fn cart_show<S: KeyValueStore>(storage: &S) {
    print_cart(&load_cart(storage));
}

/// Prints the order confirmation and starts a fresh cart.
pub fn cart_checkout<S: KeyValueStore>(storage: &mut S) -> anyhow::Result<()> {
    let cart = load_cart(storage);
    let Some(order) = cart.checkout() else {
        println!("Your cart is empty, add items before checking out");
        return Ok(());
    };
    print_confirmation(&order);
    storage.remove(CART_KEY).context("failed to clear cart")?;
    info!(code = %order.code, total = %order.total, "order confirmed");
    Ok(())
}

fn print_confirmation(order: &OrderConfirmation) {
    println!("Order confirmed!");
    println!("Order code: {}", order.code);
    for line in &order.items {
        println!("  {} x{}  {}", line.title, line.quantity, line.subtotal());
    }
    println!("Total: {}", order.total);
}

pub struct TaskFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

pub fn task_add<S: KeyValueStore>(
    store: &mut TaskStore<S>,
    fields: TaskFields,
) -> anyhow::Result<()> {
    let mut draft = TaskDraft::blank(local_today());
    apply(&mut draft, fields);
    let task = store.create(draft)?;
    println!("Task added with ID {}", task.id());
    Ok(())
}

pub fn task_edit<S: KeyValueStore>(
    store: &mut TaskStore<S>,
    id: &str,
    fields: TaskFields,
) -> anyhow::Result<()> {
    let Some(mut draft) = store.get(id).map(Task::draft) else {
        println!("No task with ID {id}");
        return Ok(());
    };
    apply(&mut draft, fields);
    if store.update(id, draft)?.is_some() {
        println!("Task {id} updated");
    }
    Ok(())
}

fn apply(draft: &mut TaskDraft, fields: TaskFields) {
    if let Some(title) = fields.title {
        draft.title = title;
    }
    if let Some(description) = fields.description {
        draft.description = description;
    }
    if let Some(due) = fields.due {
        draft.due_date = due;
    }
    if let Some(priority) = fields.priority {
        draft.priority = priority;
    }
}

pub fn task_toggle<S: KeyValueStore>(store: &mut TaskStore<S>, id: &str) {
    match store.toggle_complete(id) {
        Some(true) => println!("Task {id} marked as completed"),
        Some(false) => println!("Task {id} marked as pending"),
        None => println!("No task with ID {id}"),
    }
}

pub fn task_delete<S: KeyValueStore>(store: &mut TaskStore<S>, id: &str) {
    match store.delete(id) {
        Some(task) => println!("Task {id} deleted ({})", task.title()),
        None => println!("No task with ID {id}"),
    }
}

pub fn task_list<S: KeyValueStore>(
    store: &TaskStore<S>,
    status: StatusFilter,
    priority: PriorityFilter,
) {
    let tasks = store.visible(status, priority);
    if tasks.is_empty() {
        println!("No tasks found");
        return;
    }
    for task in tasks {
        let mark = if task.is_completed() { "x" } else { " " };
        println!(
            "[{mark}] {}  {}  ({}, due {})",
            task.id(),
            task.title(),
            task.priority(),
            task.due_date().format("%d/%m/%Y")
        );
        if !task.description().is_empty() {
            println!("    {}", task.description());
        }
    }
}
