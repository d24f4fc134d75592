//! Transcode a watch dump from the command line (or a built-in sample).
//!
//! Run with: cargo run --example pretty_print -- 'Foo(a=1, b=hello)'

use std::env;
use std::error::Error;
use watchlit::transcode;

const SAMPLE: &str = "OrderRequest(items=[OrderItemRequest(menuItemId=11002, name=Grilled Caesar Chicken, price=795, customizations=[], isComped=false)], combos=[], orderType=TO_GO, customerId=13275, cardId=vbWMVN+Tr/H+xaYnqQ35epH4QUEAT4+eQC9kpXoW+Vo=, promotionCode=null, orderTotal=859)";

fn main() -> Result<(), Box<dyn Error>> {
    let input = env::args().nth(1).unwrap_or_else(|| SAMPLE.to_string());

    let pretty = transcode(&input)?;
    println!("{pretty}");

    Ok(())
}
