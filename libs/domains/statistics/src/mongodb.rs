//! MongoDB implementation of StatisticsRepository
//!
//! Timestamps are stored as fixed-width RFC3339 strings, so window bounds
//! compare lexicographically.

use async_trait::async_trait;
use database::mongodb::datetime_bson;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc, from_document},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::StatisticsResult;
use crate::models::{ProductFacets, SalesFacets, StatusCount};
use crate::repository::StatisticsRepository;
use crate::window::TimeWindow;

pub struct MongoStatisticsRepository {
    orders: Collection<Document>,
    products: Collection<Document>,
    categories: Collection<Document>,
}

impl MongoStatisticsRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            orders: db.collection("orders"),
            products: db.collection("products"),
            categories: db.collection("categories"),
        }
    }
}

fn window_filter(window: TimeWindow) -> Document {
    match window {
        TimeWindow::All => doc! {},
        TimeWindow::Between { start, end } => doc! {
            "created_at": { "$gte": datetime_bson(&start), "$lt": datetime_bson(&end) }
        },
    }
}

fn sales_pipeline(window: TimeWindow) -> Vec<Document> {
    vec![
        doc! { "$match": window_filter(window) },
        doc! {
            "$facet": {
                "status_counts": [
                    { "$group": { "_id": "$status", "count": { "$sum": 1 } } }
                ],
                "totals": [
                    { "$unwind": "$items" },
                    { "$lookup": {
                        "from": "products",
                        "localField": "items.product_id",
                        "foreignField": "_id",
                        "as": "product",
                    } },
                    { "$unwind": { "path": "$product", "preserveNullAndEmptyArrays": true } },
                    { "$group": {
                        "_id": null,
                        "orders": { "$addToSet": "$_id" },
                        "revenue": { "$sum": {
                            "$multiply": ["$items.quantity", { "$ifNull": ["$product.price", 0] }]
                        } },
                    } },
                    { "$project": {
                        "_id": 0,
                        "distinct_orders": { "$size": "$orders" },
                        "revenue": 1,
                    } },
                ],
            }
        },
    ]
}

fn product_pipeline(window: TimeWindow) -> Vec<Document> {
    vec![
        doc! { "$match": window_filter(window) },
        doc! {
            "$facet": {
                "products": [
                    { "$group": {
                        "_id": null,
                        "total_products": { "$sum": 1 },
                        "total_stock": { "$sum": "$stock" },
                        "out_of_stock": { "$sum": { "$cond": [{ "$lte": ["$stock", 0] }, 1, 0] } },
                    } }
                ],
                "reviews": [
                    { "$unwind": "$reviews" },
                    { "$group": {
                        "_id": null,
                        "total_reviews": { "$sum": 1 },
                        "rating_sum": { "$sum": "$reviews.rating" },
                    } }
                ],
            }
        },
    ]
}

#[derive(Debug, Default, Deserialize)]
struct SalesTotals {
    #[serde(default)]
    distinct_orders: i64,
    #[serde(default)]
    revenue: f64,
}

#[derive(Debug, Default, Deserialize)]
struct SalesFacetDoc {
    #[serde(default)]
    status_counts: Vec<StatusCount>,
    #[serde(default)]
    totals: Vec<SalesTotals>,
}

#[derive(Debug, Default, Deserialize)]
struct ProductTotals {
    #[serde(default)]
    total_products: i64,
    #[serde(default)]
    total_stock: i64,
    #[serde(default)]
    out_of_stock: i64,
}

#[derive(Debug, Default, Deserialize)]
struct ReviewTotals {
    #[serde(default)]
    total_reviews: i64,
    #[serde(default)]
    rating_sum: i64,
}

#[derive(Debug, Default, Deserialize)]
struct ProductFacetDoc {
    #[serde(default)]
    products: Vec<ProductTotals>,
    #[serde(default)]
    reviews: Vec<ReviewTotals>,
}

impl From<SalesFacetDoc> for SalesFacets {
    fn from(doc: SalesFacetDoc) -> Self {
        let totals = doc.totals.into_iter().next().unwrap_or_default();
        SalesFacets {
            status_counts: doc.status_counts,
            distinct_orders: totals.distinct_orders,
            revenue: totals.revenue,
        }
    }
}

impl From<ProductFacetDoc> for ProductFacets {
    fn from(doc: ProductFacetDoc) -> Self {
        let products = doc.products.into_iter().next().unwrap_or_default();
        let reviews = doc.reviews.into_iter().next().unwrap_or_default();
        ProductFacets {
            total_products: products.total_products,
            total_stock: products.total_stock,
            out_of_stock: products.out_of_stock,
            total_reviews: reviews.total_reviews,
            rating_sum: reviews.rating_sum,
        }
    }
}

#[async_trait]
impl StatisticsRepository for MongoStatisticsRepository {
    #[instrument(skip(self))]
    async fn sales_facets(&self, window: TimeWindow) -> StatisticsResult<SalesFacets> {
        let mut cursor = self.orders.aggregate(sales_pipeline(window)).await?;

        let facets = match cursor.try_next().await? {
            Some(raw) => from_document::<SalesFacetDoc>(raw)?.into(),
            None => SalesFacets::default(),
        };
        Ok(facets)
    }

    #[instrument(skip(self))]
    async fn product_facets(&self, window: TimeWindow) -> StatisticsResult<ProductFacets> {
        let mut cursor = self.products.aggregate(product_pipeline(window)).await?;

        let facets = match cursor.try_next().await? {
            Some(raw) => from_document::<ProductFacetDoc>(raw)?.into(),
            None => ProductFacets::default(),
        };
        Ok(facets)
    }

    #[instrument(skip(self))]
    async fn count_categories(&self) -> StatisticsResult<u64> {
        let count = self.categories.count_documents(doc! {}).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_unwindowed_filter_is_empty() {
        assert!(window_filter(TimeWindow::All).is_empty());
    }

    #[test]
    fn test_year_filter_excludes_upper_bound() {
        let filter = window_filter(TimeWindow::year(2024).unwrap());
        let created_at = filter.get_document("created_at").unwrap();

        assert_eq!(
            created_at.get_str("$gte").unwrap(),
            "2024-01-01T00:00:00.000Z"
        );
        assert_eq!(created_at.get_str("$lt").unwrap(), "2025-01-01T00:00:00.000Z");
        assert!(!created_at.contains_key("$lte"));
    }

    #[test]
    fn test_range_filter_stops_at_next_midnight() {
        let window = TimeWindow::range(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
        .unwrap();
        let filter = window_filter(window);
        let created_at = filter.get_document("created_at").unwrap();

        assert_eq!(created_at.get_str("$lt").unwrap(), "2024-04-01T00:00:00.000Z");
        assert!(!created_at.contains_key("$lte"));
    }

    #[test]
    fn test_pipelines_match_before_facet() {
        for pipeline in [
            sales_pipeline(TimeWindow::All),
            product_pipeline(TimeWindow::All),
        ] {
            assert_eq!(pipeline.len(), 2);
            assert!(pipeline[0].contains_key("$match"));
            assert!(pipeline[1].contains_key("$facet"));
        }
    }

    #[test]
    fn test_facet_documents_flatten() {
        let raw = doc! {
            "status_counts": [
                { "_id": "pending", "count": 2 },
                { "_id": "delivered", "count": 1 },
            ],
            "totals": [{ "distinct_orders": 3, "revenue": 70.5 }],
        };
        let facets: SalesFacets = from_document::<SalesFacetDoc>(raw).unwrap().into();
        assert_eq!(facets.status_counts.len(), 2);
        assert_eq!(facets.distinct_orders, 3);
        assert_eq!(facets.revenue, 70.5);

        let empty = doc! { "products": [], "reviews": [] };
        let facets: ProductFacets = from_document::<ProductFacetDoc>(empty).unwrap().into();
        assert_eq!(facets, ProductFacets::default());
    }

    #[tokio::test]
    #[ignore] // Requires a running MongoDB
    async fn test_empty_database_yields_zero_facets() {
        let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let db = client.database("store_statistics_test");
        let repo = MongoStatisticsRepository::new(&db);

        let sales = repo.sales_facets(TimeWindow::year(1901).unwrap()).await.unwrap();
        assert_eq!(sales, SalesFacets::default());
    }
}
