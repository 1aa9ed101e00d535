use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    // 未设置 DATABASE_URL 时由 sea-orm-migration CLI 报错提示，
    // 本地开发可使用: DATABASE_URL=sqlite://data/chirpy.db cargo run -p migration -- up
    cli::run_cli(migration::Migrator).await;
}
