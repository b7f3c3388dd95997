//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use csharp_transformer::{resolve, MethodStyle, Options, Toggles};

/// A small but complete model file touching every construct.
pub const ORDER_MODEL: &str = r#"using System;
using System.Collections.Generic;

namespace Shop.Models
{
    /// <summary>
    /// A customer order.
    /// </summary>
    [Serializable]
    public class Order : EntityBase, IAuditable
    {
        [Key]
        public int Id { get; set; }

        public string? Note { get; set; }

        public List<OrderLine> Lines { get; set; } = new List<OrderLine>();

        private readonly decimal _total;

        public Order(int id)
        {
            Id = id;
        }

        /// <summary>Adds a line.</summary>
        /// <param name="line">The line to add.</param>
        public void AddLine(OrderLine line)
        {
            Lines.Add(line);
        }

        public class OrderLine
        {
            public string Sku { get; set; }
            public int Quantity { get; set; }
        }
    }

    public enum Status
    {
        Open,
        Closed,
    }
}
"#;

/// Every combination of the three toggles.
pub fn all_toggle_combinations() -> Vec<Options> {
    let mut all = Vec::new();
    for preserve_modifiers in [false, true] {
        for class_to_interface in [false, true] {
            for method_style in [
                MethodStyle::Signature,
                MethodStyle::Lambda,
                MethodStyle::Controller,
            ] {
                all.push(resolve(Toggles {
                    preserve_modifiers,
                    method_style,
                    class_to_interface,
                }));
            }
        }
    }
    all
}
