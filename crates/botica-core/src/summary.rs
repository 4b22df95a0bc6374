//! # Order Summary
//!
//! Renders the plain-text itemization handed off to the external messaging
//! channel when the shopper checks out.
//!
//! ## Format
//! ```text
//! Hola! Quisiera realizar el siguiente pedido:
//!
//! *Melatonina Forte (Melatonina 5mg x 30)*
//!   - Cantidad: 5
//!   - Precio Unitario: S/ 8.00 (Mayoreo (10+))
//!   - Subtotal: S/ 40.00
//!
//! Subtotal: S/ 200.00                        ← only when a discount applies
//! Descuento (BIENVENIDO10): -S/ 20.00
//! *TOTAL DEL PEDIDO: S/ 180.00*
//! _(Total de unidades: 25)_
//! ```
//!
//! Composing the actual message link (URL encoding, phone number) is the
//! presentation layer's job; this module only produces the text.

use std::fmt::Write;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::CoreResult;

/// Renders the order summary for the current cart.
///
/// Unit prices and line subtotals reflect the tier the whole cart qualifies
/// for at this moment, the same figures the sidebar shows.
pub fn order_summary(cart: &Cart, catalog: &Catalog) -> CoreResult<String> {
    let totals = cart.totals(catalog)?;
    let mut message = String::from("Hola! Quisiera realizar el siguiente pedido:\n\n");

    for line in cart.priced_lines(catalog)? {
        // write! to String cannot fail
        let _ = write!(
            message,
            "*{}*\n  - Cantidad: {}\n  - Precio Unitario: {} ({})\n  - Subtotal: {}\n\n",
            line.display_name, line.quantity, line.unit_price, line.tier_label, line.line_total
        );
    }

    if let Some(discount) = &totals.discount {
        let _ = write!(
            message,
            "Subtotal: {}\nDescuento ({}): -{}\n",
            totals.subtotal, discount.code, discount.amount
        );
    }

    let _ = write!(
        message,
        "*TOTAL DEL PEDIDO: {}*\n_(Total de unidades: {})_",
        totals.total, totals.total_quantity
    );

    Ok(message)
}

// =============================================================================
// Unit Tests
// =============================================================================
