use image_fetcher::{DownloadTask, Downloader};

const TARGET_DIR: &str = "DHARA/public/assets/images";

fn main() {
    env_logger::init();

    let tasks = [
        DownloadTask::new("tractor.png", "https://loremflickr.com/800/600/tractor,farm"),
        DownloadTask::new(
            "drone.png",
            "https://loremflickr.com/800/600/drone,agriculture",
        ),
        DownloadTask::new(
            "harvester.png",
            "https://loremflickr.com/800/600/harvester,farm",
        ),
        DownloadTask::new(
            "jcb.png",
            "https://loremflickr.com/800/600/excavator,construction",
        ),
    ];

    let downloader = match Downloader::new(TARGET_DIR) {
        Ok(downloader) => downloader,
        Err(error) => {
            eprintln!("Error creating target directory {}: {}", TARGET_DIR, error);
            return;
        }
    };

    downloader.fetch_all(&tasks);
}
