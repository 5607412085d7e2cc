use mongodb::{
    bson::doc,
    options::IndexOptions,
    Database, IndexModel,
};

pub async fn ensure_indexes(db: &Database) -> Result<(), String> {
    // users: unique email
    {
        let col = db.collection::<mongodb::bson::Document>("users");
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    // orders: customer snapshot (by owner, newest first)
    {
        let col = db.collection::<mongodb::bson::Document>("orders");
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    // orders: operator snapshot sort
    {
        let col = db.collection::<mongodb::bson::Document>("orders");
        let model = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    Ok(())
}
