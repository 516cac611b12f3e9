//! Turns raw aggregation sums into KPIs

use crate::models::{ProductFacets, ProductStatistics, SalesFacets, SalesStatistics};

pub fn sales_statistics(facets: &SalesFacets) -> SalesStatistics {
    let mut stats = SalesStatistics {
        total_revenue: facets.revenue,
        ..Default::default()
    };

    for group in &facets.status_counts {
        match group.status.as_str() {
            "pending" => stats.pending_orders += group.count,
            "shipped" => stats.shipped_orders += group.count,
            "delivered" => stats.delivered_orders += group.count,
            "cancelled" => stats.cancelled_orders += group.count,
            other => tracing::warn!(status = other, count = group.count, "Unknown order status"),
        }
    }

    stats.total_orders = stats.pending_orders
        + stats.shipped_orders
        + stats.delivered_orders
        + stats.cancelled_orders;

    if stats.total_orders > 0 {
        stats.average_order = stats.total_revenue / stats.total_orders as f64;
    }

    stats
}

pub fn product_statistics(facets: &ProductFacets, total_categories: u64) -> ProductStatistics {
    let average_rating = if facets.total_reviews > 0 {
        facets.rating_sum as f64 / facets.total_reviews as f64
    } else {
        0.0
    };

    ProductStatistics {
        total_products: facets.total_products,
        total_stock: facets.total_stock,
        out_of_stock: facets.out_of_stock,
        total_reviews: facets.total_reviews,
        average_rating,
        total_categories: i64::try_from(total_categories).unwrap_or(i64::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatusCount;

    fn count(status: &str, count: i64) -> StatusCount {
        StatusCount {
            status: status.to_string(),
            count,
        }
    }

    #[test]
    fn test_total_is_sum_of_statuses() {
        let stats = sales_statistics(&SalesFacets {
            status_counts: vec![
                count("pending", 3),
                count("shipped", 2),
                count("delivered", 4),
                count("cancelled", 1),
            ],
            distinct_orders: 10,
            revenue: 250.0,
        });

        assert_eq!(stats.total_orders, 10);
        assert_eq!(
            stats.total_orders,
            stats.pending_orders + stats.shipped_orders + stats.delivered_orders
                + stats.cancelled_orders
        );
        assert_eq!(stats.average_order, 25.0);
    }

    #[test]
    fn test_no_orders_means_zero_average() {
        let stats = sales_statistics(&SalesFacets::default());
        assert_eq!(stats, SalesStatistics::default());
        assert_eq!(stats.average_order, 0.0);
    }

    #[test]
    fn test_unknown_status_is_not_counted() {
        let stats = sales_statistics(&SalesFacets {
            status_counts: vec![count("pending", 1), count("lost", 5)],
            distinct_orders: 1,
            revenue: 10.0,
        });
        assert_eq!(stats.total_orders, 1);
        assert_eq!(stats.average_order, 10.0);
    }

    #[test]
    fn test_average_rating() {
        let stats = product_statistics(
            &ProductFacets {
                total_products: 2,
                total_stock: 7,
                out_of_stock: 1,
                total_reviews: 4,
                rating_sum: 14,
            },
            3,
        );
        assert_eq!(stats.average_rating, 3.5);
        assert_eq!(stats.total_categories, 3);
    }

    #[test]
    fn test_no_reviews_means_zero_rating() {
        let stats = product_statistics(&ProductFacets::default(), 0);
        assert_eq!(stats.average_rating, 0.0);
    }
}
