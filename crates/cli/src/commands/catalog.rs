//! Catalog browsing commands.

use nexus_shop_client::api::ProductListParams;
use nexus_shop_core::{Category, CategoryId, ProductId};
use tracing::info;

use super::{CommandError, Context};

/// List products with optional filters.
pub async fn list_products(
    ctx: &Context,
    page: Option<u32>,
    limit: Option<u32>,
    category_id: Option<CategoryId>,
    search: Option<String>,
    available_only: bool,
) -> Result<(), CommandError> {
    let params = ProductListParams {
        page,
        limit,
        category_id,
        search,
        available_only: available_only.then_some(true),
        ..ProductListParams::default()
    };
    let result = ctx.client.list_products(&params).await?;

    info!(
        "{} products (page {}/{}, {} total)",
        result.products.len(),
        result.page,
        result.pages,
        result.total
    );
    for product in &result.products {
        info!(
            "  #{} {} - {} (stock {})",
            product.id, product.name, product.price, product.stock
        );
    }
    Ok(())
}

/// Show one product in full.
pub async fn show_product(ctx: &Context, id: ProductId) -> Result<(), CommandError> {
    let product = ctx.client.get_product(id).await?;

    info!("#{} {}", product.id, product.name);
    info!("  price: {}", product.price);
    info!("  stock: {}", product.stock);
    if let Some(category) = product.category_id {
        info!("  category: {category}");
    }
    if !product.description.is_empty() {
        info!("  {}", product.description);
    }
    for image in &product.images {
        info!("  image: {}", image.url);
    }
    Ok(())
}

/// Delete a product (admin).
pub async fn delete_product(ctx: &Context, id: ProductId) -> Result<(), CommandError> {
    ctx.client.delete_product(id).await?;
    info!("Deleted product {id}");
    Ok(())
}

/// List categories flat.
pub async fn list_categories(ctx: &Context) -> Result<(), CommandError> {
    let categories = ctx.client.list_categories().await?;
    info!("{} categories", categories.len());
    for category in &categories {
        match category.parent_id {
            Some(parent) => info!("  #{} {} (parent {})", category.id, category.name, parent),
            None => info!("  #{} {}", category.id, category.name),
        }
    }
    Ok(())
}

/// Print the category tree with indentation.
pub async fn show_category_tree(ctx: &Context) -> Result<(), CommandError> {
    let tree = ctx.client.category_tree().await?;
    for root in &tree {
        print_node(root, 0);
    }
    Ok(())
}

fn print_node(node: &Category, depth: usize) {
    info!("{}#{} {}", "  ".repeat(depth + 1), node.id, node.name);
    if let Some(children) = &node.children {
        for child in children {
            print_node(child, depth + 1);
        }
    }
}

/// Create a category (admin).
pub async fn create_category(
    ctx: &Context,
    name: &str,
    parent_id: Option<CategoryId>,
) -> Result<(), CommandError> {
    ctx.client.create_category(name, parent_id).await?;
    info!("Created category {name}");
    Ok(())
}
