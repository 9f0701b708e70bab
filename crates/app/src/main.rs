//! Storefront CLI

use std::{num::NonZeroU32, process};

use clap::{Args, Parser, Subcommand};
use storefront::prelude::{
    CartItem, CustomerUpdate, Password, PricingSnapshot, RegistrationForm, ShippingField,
    annotate, price_cart,
};
use storefront_app::{
    cart::CartStore,
    checkout::{CheckoutEntry, CheckoutFlow, read_last_order},
    config::ClientConfig,
    context::AppContext,
    navigation::Route,
    observability,
    session::{RegistrationOutcome, SessionError, SessionStore},
};

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront client", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ClientConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in
    Login(LoginArgs),

    /// Create an account and sign in
    Register(RegisterArgs),

    /// Sign out
    Logout,

    /// Show the signed-in customer
    Whoami(WhoamiArgs),

    /// Update the signed-in customer's profile
    Profile(ProfileArgs),

    /// Inspect or change the cart
    Cart(CartCommand),

    /// Place a pay-on-delivery order for the cart
    Checkout(CheckoutArgs),

    /// Show the most recently placed order
    LastOrder,
}

#[derive(Debug, Args)]
struct LoginArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
struct RegisterArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    password: String,

    /// Defaults to the password
    #[arg(long)]
    confirm_password: Option<String>,
}

#[derive(Debug, Args)]
struct WhoamiArgs {
    /// Refresh the customer record from the backend first
    #[arg(long)]
    refresh: bool,
}

#[derive(Debug, Args)]
struct ProfileArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    mobile: Option<String>,

    #[arg(long)]
    address: Option<String>,
}

#[derive(Debug, Args)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// List cart lines and totals
    Show,

    /// Add a product to the cart
    Add(AddItemArgs),

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct AddItemArgs {
    #[arg(long)]
    id: String,

    #[arg(long)]
    name: String,

    /// Unit price in minor units
    #[arg(long)]
    price: u64,

    #[arg(long, default_value_t = NonZeroU32::MIN)]
    quantity: NonZeroU32,

    #[arg(long)]
    image: Option<String>,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    postal_code: Option<String>,

    #[arg(long)]
    notes: Option<String>,
}

impl CheckoutArgs {
    fn fields(&self) -> [(ShippingField, Option<&String>); 7] {
        [
            (ShippingField::FirstName, self.first_name.as_ref()),
            (ShippingField::LastName, self.last_name.as_ref()),
            (ShippingField::Email, self.email.as_ref()),
            (ShippingField::Phone, self.phone.as_ref()),
            (ShippingField::Address, self.address.as_ref()),
            (ShippingField::City, self.city.as_ref()),
            (ShippingField::PostalCode, self.postal_code.as_ref()),
        ]
    }
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = observability::init(&cli.config.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let ctx = AppContext::from_config(&cli.config)
        .map_err(|error| format!("failed to start: {error}"))?;

    match cli.command {
        Commands::Login(args) => login(&ctx, args).await,
        Commands::Register(args) => register(&ctx, args).await,
        Commands::Logout => {
            ctx.session().logout().await;
            println!("signed out");
            Ok(())
        }
        Commands::Whoami(args) => whoami(&ctx, args).await,
        Commands::Profile(args) => update_profile(&ctx, args).await,
        Commands::Cart(CartCommand { command }) => cart(&ctx, command),
        Commands::Checkout(args) => checkout(&ctx, args).await,
        Commands::LastOrder => last_order(&ctx),
    }
}

fn describe(error: &SessionError) -> String {
    match error.message() {
        Some(message) => message.to_string(),
        None => error.to_string(),
    }
}

async fn login(ctx: &AppContext, args: LoginArgs) -> Result<(), String> {
    let mut session = ctx.session();

    if let Some(route) = Route::Login.guard_auth_page(session.state()) {
        println!("already signed in, see {route}");
        return Ok(());
    }

    session
        .login(args.email.trim(), &Password::new(args.password))
        .await
        .map_err(|error| format!("login failed: {}", describe(&error)))?;

    print_customer(&session);

    Ok(())
}

async fn register(ctx: &AppContext, args: RegisterArgs) -> Result<(), String> {
    let mut session = ctx.session();

    if let Some(route) = Route::Register.guard_auth_page(session.state()) {
        println!("already signed in, see {route}");
        return Ok(());
    }

    let confirm_password = args
        .confirm_password
        .unwrap_or_else(|| args.password.clone());

    let data = RegistrationForm {
        name: args.name,
        email: args.email,
        phone: args.phone,
        password: Password::new(args.password),
        confirm_password: Password::new(confirm_password),
    }
    .validate()
    .map_err(|error| format!("registration failed: {error}"))?;

    match session.register(data).await {
        Ok(RegistrationOutcome::Authenticated) => {
            print_customer(&session);
            Ok(())
        }
        Ok(RegistrationOutcome::Registered(_)) => {
            println!("account created, sign in to continue");
            Ok(())
        }
        Err(error @ SessionError::AutoLogin { .. }) => Err(format!(
            "account created, but signing in failed: {}",
            describe(&error)
        )),
        Err(error) => Err(format!("registration failed: {}", describe(&error))),
    }
}

async fn whoami(ctx: &AppContext, args: WhoamiArgs) -> Result<(), String> {
    let mut session = ctx.session();

    if args.refresh && session.is_authenticated() {
        session.fetch_current_user().await;
    }

    print_customer(&session);

    Ok(())
}

async fn update_profile(ctx: &AppContext, args: ProfileArgs) -> Result<(), String> {
    let mut session = ctx.session();

    if !session.is_authenticated() {
        return Err("not signed in".to_string());
    }

    let update = CustomerUpdate {
        name: args.name,
        email: args.email,
        phone: args.phone,
        mobile: args.mobile,
        address: args.address,
    };

    if update.is_empty() {
        return Err("nothing to update".to_string());
    }

    session
        .update_user(&update)
        .await
        .map_err(|error| format!("profile update failed: {}", describe(&error)))?;

    print_customer(&session);

    Ok(())
}

fn cart(ctx: &AppContext, command: CartSubcommand) -> Result<(), String> {
    match command {
        CartSubcommand::Show => {}
        CartSubcommand::Add(args) => {
            let mut item = CartItem::new(args.id, args.name, args.price, args.quantity);

            if let Some(image) = args.image {
                item = item.with_image(image);
            }

            ctx.cart
                .add_item(item)
                .map_err(|error| format!("failed to add item: {error}"))?;
        }
        CartSubcommand::Clear => {
            ctx.cart
                .clear_cart()
                .map_err(|error| format!("failed to clear cart: {error}"))?;
        }
    }

    let items = ctx
        .cart
        .get_cart()
        .map_err(|error| format!("failed to read cart: {error}"))?;

    if items.is_empty() {
        println!("cart is empty");
        return Ok(());
    }

    let services = ctx.checkout_services();

    for line in annotate(&items, &services.rules) {
        let badges = line
            .badges
            .iter()
            .map(|rule| format!(" [{}]", rule.name()))
            .collect::<String>();

        println!(
            "{} x{} @ {}{badges}",
            line.item.name, line.item.quantity, line.item.price
        );
    }

    let pricing = price_cart(&items, &ctx.policy)
        .map_err(|error| format!("failed to price cart: {error}"))?;

    print_pricing(&pricing);

    Ok(())
}

async fn checkout(ctx: &AppContext, args: CheckoutArgs) -> Result<(), String> {
    let session = ctx.session();

    let entry = CheckoutFlow::mount(ctx.checkout_services(), session.state())
        .map_err(|error| format!("checkout failed: {error}"))?;

    let mut flow = match entry {
        CheckoutEntry::Ready(flow) => flow,
        CheckoutEntry::Redirect(route) => {
            return Err(format!("cart is empty, see {route}"));
        }
    };

    for (field, value) in args.fields() {
        if let Some(value) = value {
            flow.form_mut().set(field, value.as_str());
        }
    }

    flow.form_mut().notes = args.notes;

    flow.continue_to_payment()
        .map_err(|error| format!("checkout failed: {error}"))?;

    let pricing = flow
        .pricing()
        .map_err(|error| format!("failed to price cart: {error}"))?;

    print_pricing(&pricing);

    let route = flow
        .place_order()
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    if let Route::OrderConfirmation { order_number } = &route {
        println!("order placed: {order_number}");
    }

    println!("{route}");

    Ok(())
}

fn last_order(ctx: &AppContext) -> Result<(), String> {
    let Some(order) = read_last_order(ctx.store.as_ref())
        .map_err(|error| format!("failed to read last order: {error}"))?
    else {
        println!("no order placed yet");
        return Ok(());
    };

    println!("order_number: {}", order.order_number);
    println!("order_id: {}", order.order_id);
    println!("placed_at: {}", order.order_date);
    println!("status: {:?}", order.status);
    println!("lines: {}", order.items.len());
    println!("subtotal: {}", order.pricing.subtotal);
    println!("shipping: {}", order.pricing.shipping);
    println!("total: {}", order.pricing.total);

    Ok(())
}

fn print_customer(session: &SessionStore) {
    match session.user() {
        Some(user) if session.is_authenticated() => {
            println!("customer_id: {}", user.id);
            println!("name: {}", user.name);
            println!("email: {}", user.email);
        }
        _ => println!("not signed in"),
    }
}

fn print_pricing(pricing: &PricingSnapshot) {
    println!("subtotal: {}", pricing.subtotal());
    println!("shipping: {}", pricing.shipping_cost());
    println!("total: {}", pricing.total());
}
