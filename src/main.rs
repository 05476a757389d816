fn main() -> anyhow::Result<()> {
    flow_lights::demo::run()
}
